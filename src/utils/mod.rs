pub mod math;
pub mod option_parsing;
