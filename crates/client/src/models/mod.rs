//! Resource schemas.
//!
//! Responsibilities:
//! - One concrete struct per resource kind, decoded with serde. Optional
//!   fields are [`Ref`](crate::optional::Ref)s with their policy fixed by the
//!   field's `deserialize_with` attribute.
//! - The closed [`Resource`] union and its [`ResourceKind`] tags.
//! - The shared capability traits: [`RedfishResource`] (identity, OEM slots,
//!   outgoing links, embedded members) and [`ResourceSchema`] (discriminator
//!   patterns and OEM bindings used by the registry).
//! - The decode pipeline: detach OEM objects, decode fields, resolve OEM.
//!
//! Does NOT handle:
//! - Choosing a schema for a payload (see [`crate::registry`]).
//! - Fetching anything. Schemas never touch the transport.
//!
//! Invariants:
//! - Every schema declares at least one discriminator pattern.
//! - Decoding is synchronous and shares no state.

/// Enumeration with a catch-all `Unknown` for values added by newer firmware.
macro_rules! redfish_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
            /// Value not known to this client.
            #[serde(other)]
            Unknown,
        }

        impl $name {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unknown => "Unknown",
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Identity accessors shared by every schema struct.
macro_rules! resource_identity {
    () => {
        fn odata_id(&self) -> &crate::odata::ODataId {
            &self.odata_id
        }

        fn odata_type(&self) -> Option<&str> {
            self.odata_type.as_deref()
        }

        fn oem(&self) -> &crate::oem::OemSlots {
            &self.oem
        }
    };
}

/// `MemberId` addressing for entries of an embedded collection.
macro_rules! embedded_member {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl crate::links::EmbeddedMember for $ty {
                fn member_id(&self) -> &crate::optional::Ref<String> {
                    &self.member_id
                }

                fn odata_id_mut(&mut self) -> &mut crate::odata::ODataId {
                    &mut self.odata_id
                }
            }
        )+
    };
}

pub mod chassis;
pub mod collection;
pub mod common;
pub mod computer_system;
pub mod drive;
pub mod endpoint;
pub mod ethernet_switch;
pub mod memory;
pub mod port;
pub mod power;
pub mod processor;
pub mod service_root;
pub mod storage_pool;
pub mod thermal;
pub mod volume;

pub use chassis::{Chassis, ChassisLinks};
pub use collection::ResourceCollection;
pub use common::{
    ActionTarget, ChassisType, Health, Identifier, IndicatorLed, PhysicalContext, PowerState,
    Protocol, RedfishError, ResetAction, State, Status,
};
pub use computer_system::{ComputerSystem, SystemType};
pub use drive::Drive;
pub use endpoint::Endpoint;
pub use ethernet_switch::{EthernetSwitch, EthernetSwitchPort};
pub use memory::Memory;
pub use port::Port;
pub use power::{Power, PowerControl, PowerSupply, Voltage};
pub use processor::Processor;
pub use service_root::ServiceRoot;
pub use storage_pool::StoragePool;
pub use thermal::{Fan, Redundancy, Temperature, Thermal};
pub use volume::Volume;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::links::ResourceLink;
use crate::oem::{OemBindings, OemSlots, RawOem};
use crate::odata::{self, ODataId};
use crate::registry::TypeRegistry;

/// Capabilities every decoded resource exposes.
pub trait RedfishResource {
    /// URI the resource was decoded from. Empty when the payload carried no
    /// `@odata.id` and was not fetched through a reader.
    fn odata_id(&self) -> &ODataId;

    /// The `@odata.type` discriminator as sent by the service.
    fn odata_type(&self) -> Option<&str>;

    fn oem(&self) -> &OemSlots;

    /// Named outgoing references.
    fn links(&self) -> Vec<ResourceLink> {
        Vec::new()
    }

    /// Entry `member_id` of the embedded collection `collection`.
    fn embedded_member(&self, _collection: &str, _member_id: &str) -> Option<Resource> {
        None
    }
}

/// A resource struct the registry can decode.
pub trait ResourceSchema: RedfishResource + DeserializeOwned + Into<Resource> + 'static {
    const KIND: ResourceKind;

    /// Discriminator templates, see [`crate::registry::TypePattern`].
    const TYPE_PATTERNS: &'static [&'static str];

    /// Vendor parsers per attachment point.
    const OEM: OemBindings = OemBindings::NONE;

    fn set_oem(&mut self, slots: OemSlots);

    /// Post-decode fix-ups (e.g. synthesizing embedded member ids).
    fn finalize(&mut self) {}
}

/// Decode a payload known to be of schema `T`.
pub fn decode_resource<T: ResourceSchema>(mut payload: Value) -> Result<Resource> {
    let uri = odata::odata_id(&payload);
    let raw_oem = RawOem::detach(&mut payload);

    let mut resource: T = serde_json::from_value(payload).map_err(|e| {
        ClientError::decode(T::KIND.as_str(), uri.as_ref().map(ODataId::as_str), e)
    })?;

    let (slots, oem_error) = T::OEM.resolve(raw_oem);
    resource.set_oem(slots);
    resource.finalize();

    match oem_error {
        Some(error) => Err(ClientError::OemDecode {
            error,
            resource: Box::new(resource.into()),
        }),
        None => Ok(resource.into()),
    }
}

/// A payload type carried by one [`Resource`] variant.
pub trait ResourceVariant: Sized {
    fn from_resource(resource: &Resource) -> Option<&Self>;
    fn from_owned(resource: Resource) -> std::result::Result<Self, Resource>;
}

macro_rules! resources {
    ($($variant:ident($ty:ty) => $label:literal),+ $(,)?) => {
        /// Tag of a resource schema.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ResourceKind {
            $($variant),+
        }

        impl ResourceKind {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl ::std::fmt::Display for ResourceKind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// A decoded resource of any kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $($variant($ty)),+
        }

        impl Resource {
            pub fn kind(&self) -> ResourceKind {
                match self {
                    $(Self::$variant(_) => ResourceKind::$variant),+
                }
            }

            fn inner(&self) -> &dyn RedfishResource {
                match self {
                    $(Self::$variant(r) => r),+
                }
            }
        }

        $(
            impl From<$ty> for Resource {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl ResourceVariant for $ty {
                fn from_resource(resource: &Resource) -> Option<&Self> {
                    match resource {
                        Resource::$variant(r) => Some(r),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_owned(resource: Resource) -> std::result::Result<Self, Resource> {
                    match resource {
                        Resource::$variant(r) => Ok(r),
                        #[allow(unreachable_patterns)]
                        other => Err(other),
                    }
                }
            }
        )+

        /// Register every built-in schema, in declaration order.
        pub(crate) fn register_all(registry: &mut TypeRegistry) -> Result<()> {
            $(registry.register_schema::<$ty>()?;)+
            Ok(())
        }
    };
}

resources! {
    ServiceRoot(ServiceRoot) => "ServiceRoot",
    Chassis(Chassis) => "Chassis",
    ComputerSystem(ComputerSystem) => "ComputerSystem",
    Drive(Drive) => "Drive",
    Endpoint(Endpoint) => "Endpoint",
    EthernetSwitch(EthernetSwitch) => "EthernetSwitch",
    EthernetSwitchPort(EthernetSwitchPort) => "EthernetSwitchPort",
    Port(Port) => "Port",
    Memory(Memory) => "Memory",
    Processor(Processor) => "Processor",
    Volume(Volume) => "Volume",
    StoragePool(StoragePool) => "StoragePool",
    Power(Power) => "Power",
    PowerControl(PowerControl) => "PowerControl",
    Voltage(Voltage) => "Voltage",
    PowerSupply(PowerSupply) => "PowerSupply",
    Thermal(Thermal) => "Thermal",
    Temperature(Temperature) => "Temperature",
    Fan(Fan) => "Fan",
    Redundancy(Redundancy) => "Redundancy",
}

impl Resource {
    /// Borrow the concrete schema struct, if this is a `T`.
    pub fn as_variant<T: ResourceVariant>(&self) -> Option<&T> {
        T::from_resource(self)
    }

    /// Take the concrete schema struct, or get `self` back.
    pub fn into_variant<T: ResourceVariant>(self) -> std::result::Result<T, Resource> {
        T::from_owned(self)
    }
}

impl RedfishResource for Resource {
    fn odata_id(&self) -> &ODataId {
        self.inner().odata_id()
    }

    fn odata_type(&self) -> Option<&str> {
        self.inner().odata_type()
    }

    fn oem(&self) -> &OemSlots {
        self.inner().oem()
    }

    fn links(&self) -> Vec<ResourceLink> {
        self.inner().links()
    }

    fn embedded_member(&self, collection: &str, member_id: &str) -> Option<Resource> {
        self.inner().embedded_member(collection, member_id)
    }
}
