/// Use cases module containing application business logic orchestration
mod explore_tree;

pub use explore_tree::ExploreTreeUseCase;
