pub mod books;
pub mod frontend;

use std::sync::Arc;

use bookshelf_db::BookStore;
use bookshelf_kernel::{ModuleRegistry, ServiceKind};

/// Register the module that makes up `service`, sharing one store handle.
pub fn register_all(registry: &mut ModuleRegistry, service: ServiceKind, store: Arc<dyn BookStore>) {
    let module = match service {
        ServiceKind::Read => books::read::create_module(store),
        ServiceKind::Write => books::write::create_module(store),
        ServiceKind::Delete => books::delete::create_module(store),
        ServiceKind::Frontend => frontend::create_module(store),
    };
    registry.register(module);
}
