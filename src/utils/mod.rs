pub mod duration_format;
pub mod time_parse;
