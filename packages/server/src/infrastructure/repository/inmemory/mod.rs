pub mod activity;

pub use activity::InMemoryActivityRepository;
