pub mod errors;
pub mod names;
pub mod retention;
pub mod rollover;
pub mod run;
pub mod settings;
pub mod stats;
pub mod tagger;
