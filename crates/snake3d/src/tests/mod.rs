//! Behavioural tests spanning the chain, the detector and the game

mod scenarios;
