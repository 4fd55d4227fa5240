/// Which side of the session a component is running on. The Server is the
/// single authority; Clients only observe and predict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Server,
    Client,
}

impl HostType {
    /// Only the authority may assign NetworkIds or finalize objectives
    pub fn is_authority(&self) -> bool {
        *self == HostType::Server
    }
}
