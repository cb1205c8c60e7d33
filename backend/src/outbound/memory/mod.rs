//! Process-local adapters for development and tests.

mod in_memory_community_code_repository;

pub use in_memory_community_code_repository::InMemoryCommunityCodeRepository;
