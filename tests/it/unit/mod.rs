mod profile_tests;
mod settings_tests;
mod watcher_tests;
