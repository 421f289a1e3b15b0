pub mod civic_info;
