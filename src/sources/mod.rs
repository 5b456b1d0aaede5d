// src/sources/mod.rs

//! Where candidate names come from. Both sources only gather raw strings;
//! normalization happens when the candidate set is built.

pub mod crtsh;
pub mod wordlist;
