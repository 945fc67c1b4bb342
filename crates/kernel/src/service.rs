use std::fmt;

/// The independent HTTP services that make up the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// `GET /api/books` and `GET /api/books/{id}`; seeds the defaults on start.
    Read,
    /// `POST /api/books`
    Write,
    /// `DELETE /api/books/{id}`
    Delete,
    /// Server-rendered HTML views.
    Frontend,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Read,
        ServiceKind::Write,
        ServiceKind::Delete,
        ServiceKind::Frontend,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Read => "read",
            ServiceKind::Write => "write",
            ServiceKind::Delete => "delete",
            ServiceKind::Frontend => "frontend",
        }
    }

    /// Fixed listening port used when `server.port` is not configured.
    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Read => 3001,
            ServiceKind::Write => 3002,
            ServiceKind::Delete => 3004,
            ServiceKind::Frontend => 3005,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
