pub mod googleplay;
