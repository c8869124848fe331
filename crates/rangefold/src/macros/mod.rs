#[macro_use]
mod cfg;
