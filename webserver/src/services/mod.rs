//! Service implementations

pub mod blog_service;

#[cfg(test)]
mod tests;
