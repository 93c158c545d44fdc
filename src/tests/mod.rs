// Test modules for glm-chat
//
// Each source file has a corresponding test file that focuses on
// behavior verification. HTTP-level tests live in the crate's tests/ dir.

// Shared fixtures and fake transports
pub mod helpers;

pub mod streaming;
