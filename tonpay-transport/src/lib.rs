pub mod tonapi;
