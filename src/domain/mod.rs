// Domain layer: the resource record shapes and the ports the core works
// against. Nothing here touches the network or the filesystem.

pub mod model;
pub mod ports;
