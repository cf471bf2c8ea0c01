// Services module - Business logic

pub mod dex_parser;
