//! Multi-conversation chat client over a single request/response chat endpoint.

// Interdiction stricte de pratiques dangereuses ou non idiomatiques
#![deny(unsafe_code)] // Le code unsafe est interdit
#![deny(missing_docs)] // Toute fonction, struct, enum ou module public doit être documenté
#![deny(non_camel_case_types)]
#![deny(unused_must_use)] // Oblige à gérer explicitement les Result et Option
#![deny(non_snake_case)]
#![deny(non_upper_case_globals)]
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(unused_imports, unused_variables, dead_code)]

// Clippy pour stricte discipline
#![deny(clippy::all)]
#![deny(clippy::unwrap_used)] // Interdit unwrap()
#![deny(clippy::expect_used)] // Interdit expect()
#![deny(clippy::panic)] // Interdit panic!()
#![deny(clippy::print_stdout)] // Interdit println!() en production
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_in_result)] // Interdit unwrap() sur Result
#![deny(clippy::module_inception)] // Interdit un module ayant le même nom que le crate
#![deny(clippy::redundant_clone)]
#![deny(clippy::too_many_arguments)] // Limite le nombre d’arguments des fonctions
#![deny(clippy::cognitive_complexity)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

// Lints pour sécurité et robustesse
#![deny(overflowing_literals)]

/// Chat backends (HTTP endpoint, local demo responder).
pub mod backend;
/// Terminal chat client.
pub mod client;
/// Identifiers, messages, conversations, errors and configuration.
pub mod domain;
/// Demo chat server implementing the wire contract.
pub mod server;
/// Session state and the send pipeline.
pub mod session;
/// Entry helpers for the binaries.
pub mod start_clonechat;
/// In-memory conversation store.
pub mod store;
/// Text rendering of chat, sidebar and scroll state.
pub mod view;
