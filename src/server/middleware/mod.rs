//! Request guards and extractors.

pub mod auth;

#[cfg(test)]
mod test;
