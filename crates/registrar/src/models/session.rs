/// Minimal account descriptor handed back on a successful login
///
/// Sessions are not persisted server-side; the boundary layer decides
/// what credential artifact, if any, to derive from this.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}
