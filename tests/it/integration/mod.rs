mod build_workflow_tests;
mod server_tests;
