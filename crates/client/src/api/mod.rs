//! Authorized query clients
//!
//! One client per query family. Each holds its own copy of the bearer token
//! in a [`TokenSlot`]; the facade writes the same token into all of them
//! after a successful authentication.

pub mod cnd;
pub mod cnpj;
pub mod cpf;
mod lookup;
pub mod token_slot;

pub use cnd::CndClient;
pub use cnpj::CnpjClient;
pub use cpf::CpfClient;
pub use token_slot::TokenSlot;
