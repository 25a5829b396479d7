pub(crate) mod helpers;
mod scenarios;
