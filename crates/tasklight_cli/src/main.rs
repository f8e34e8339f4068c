//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklight_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tasklight_core::{SqliteStorage, StoragePort, TaskStore};

fn main() {
    println!("tasklight_core version={}", tasklight_core::core_version());

    match SqliteStorage::open_in_memory() {
        Ok(storage) => {
            let store = TaskStore::new(storage);
            println!("store ok tasks={}", store.tasks().len());
            println!(
                "theme={:?} onboarding={}",
                store.storage().load_theme_preference(),
                store.storage().is_onboarding_complete()
            );
        }
        Err(err) => {
            eprintln!("storage bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
