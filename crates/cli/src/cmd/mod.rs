pub mod doctor;
pub mod format;
pub mod input;
pub mod output;
pub mod parse;
pub mod split;
pub mod stringify;
