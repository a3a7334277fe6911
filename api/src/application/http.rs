pub mod analysis;
pub mod health;
pub mod multipart;
pub mod page;
pub mod server;
pub mod session;

#[cfg(test)]
mod test;
