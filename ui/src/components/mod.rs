pub mod graphql_form;
pub mod task_filter;
