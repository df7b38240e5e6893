// Application Layer - Pure logic shared by adapters

pub mod generated_queries;

pub use generated_queries::GeneratedQueryProvider;
