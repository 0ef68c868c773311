pub mod controller;
mod meditation;

#[cfg(test)]
mod harness;
