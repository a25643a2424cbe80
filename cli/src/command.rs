mod generate;
mod init;

pub use generate::*;
pub use init::*;
