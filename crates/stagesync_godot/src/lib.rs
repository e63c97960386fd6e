use godot::prelude::*;

mod bridge;
pub mod stage;

/// GDExtension entry point
struct StagesyncExtension;

#[gdextension]
unsafe impl ExtensionLibrary for StagesyncExtension {}
