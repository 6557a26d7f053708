// Domain layer: request/response models and the ports the core logic is
// written against. Nothing here touches the network.

pub mod model;
pub mod ports;
