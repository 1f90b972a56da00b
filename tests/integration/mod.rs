//! Integration tests for the MiniVC engine and CLI

mod cli_contracts;
mod garbage_collection;
mod materialize;
