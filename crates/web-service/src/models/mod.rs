pub mod common;

pub mod err;

pub mod extract;

pub mod projects;
