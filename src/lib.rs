#![warn(
    macro_use_extern_crate,
    missing_copy_implementations,
    noop_method_call,
    unused_qualifications
)]

pub mod core;
pub mod external;
pub mod models;
pub mod transport;
