mod event;
mod options;
mod request;
mod state;
mod transport;

#[rustfmt::skip]
pub use {
    event::*,
    options::*,
    request::*,
    state::*,
    transport::*,
};
