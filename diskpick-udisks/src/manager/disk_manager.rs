use std::collections::HashMap;

use zbus::{
    Connection,
    zvariant::{self, Value},
};
use zbus_macros::proxy;

use crate::error::DiskError;

#[proxy(
    default_service = "org.freedesktop.UDisks2",
    default_path = "/org/freedesktop/UDisks2/Manager",
    interface = "org.freedesktop.UDisks2.Manager"
)]
pub trait UDisks2Manager {
    fn get_block_devices(
        &self,
        options: HashMap<String, Value<'_>>,
    ) -> zbus::Result<Vec<zvariant::OwnedObjectPath>>;

    #[zbus(property)]
    fn version(&self) -> zbus::Result<String>;
}

/// Holds the system bus connection used to talk to UDisks2
pub struct DiskManager {
    connection: Connection,
}

impl DiskManager {
    pub async fn new() -> Result<Self, DiskError> {
        let connection = Connection::system()
            .await
            .map_err(|e| DiskError::ConnectionFailed(e.to_string()))?;
        Ok(Self { connection })
    }

    /// Get a reference to the D-Bus connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Object paths of every block device UDisks2 knows about.
    pub async fn block_object_paths(&self) -> Result<Vec<zvariant::OwnedObjectPath>, DiskError> {
        let manager = UDisks2ManagerProxy::new(&self.connection).await?;
        manager
            .get_block_devices(HashMap::new())
            .await
            .map_err(|source| DiskError::MethodFailed {
                method: "org.freedesktop.UDisks2.Manager.GetBlockDevices",
                source,
            })
    }

    /// UDisks2 daemon version, for diagnostics.
    pub async fn daemon_version(&self) -> Result<String, DiskError> {
        let manager = UDisks2ManagerProxy::new(&self.connection).await?;
        Ok(manager.version().await?)
    }
}
