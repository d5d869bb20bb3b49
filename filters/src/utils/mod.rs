//! Utility functions shared by the compiler and the command line

pub mod file;
pub mod string;
pub mod yql;
