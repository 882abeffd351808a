/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the planning API, the file
/// system and the terminal.
pub mod outbound;
