pub mod review_source;
