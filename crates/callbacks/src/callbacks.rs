//! The callback table and the splicing helpers built on it.

use crate::position::{InsertionPosition, PackPosition};
use runpack_core::PackType;
use runpack_pack::PackResources;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A published pack, shared read-only with the host.
pub type SharedPack = Arc<dyn PackResources>;

/// A registered producer of packs. Runs every time the host assembles its
/// pack list.
pub type PackCallback = Box<dyn Fn(&mut PackAdder<'_>) + Send + Sync>;

/// Id of the host's built-in pack.
pub const VANILLA_PACK_ID: &str = "vanilla";

/// Sink handed to callbacks.
pub struct PackAdder<'a> {
    sink: &'a mut dyn FnMut(SharedPack),
}

impl<'a> PackAdder<'a> {
    /// Adder forwarding packs to `sink`.
    pub fn new(sink: &'a mut dyn FnMut(SharedPack)) -> Self {
        Self { sink }
    }

    /// Hand over one pack.
    pub fn add(&mut self, pack: SharedPack) {
        debug!(
            pack = pack.pack_id(),
            known_pack = ?pack.location().known_pack,
            "adding pack"
        );
        (self.sink)(pack);
    }

    /// Hand over a pack that is not shared yet.
    pub fn add_pack(&mut self, pack: impl PackResources + 'static) {
        self.add(Arc::new(pack));
    }

    /// Hand over several packs in order.
    pub fn add_all(&mut self, packs: impl IntoIterator<Item = SharedPack>) {
        for pack in packs {
            self.add(pack);
        }
    }
}

/// Callbacks keyed by position and pack type, in registration order.
///
/// Created by the host and passed to whoever registers packs; there is no
/// process-wide instance.
#[derive(Default)]
pub struct PackCallbacks {
    callbacks: HashMap<(PackPosition, PackType), Vec<PackCallback>>,
}

impl fmt::Debug for PackCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .callbacks
            .iter()
            .map(|(key, callbacks)| (key, callbacks.len()))
            .collect();
        f.debug_struct("PackCallbacks")
            .field("callbacks", &counts)
            .finish()
    }
}

impl PackCallbacks {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for packs of `pack_type` at `position`.
    pub fn register<F>(&mut self, position: PackPosition, pack_type: PackType, callback: F)
    where
        F: Fn(&mut PackAdder<'_>) + Send + Sync + 'static,
    {
        self.register_all(position, pack_type, [Box::new(callback) as PackCallback]);
    }

    /// Register several callbacks, keeping their order.
    pub fn register_all(
        &mut self,
        position: PackPosition,
        pack_type: PackType,
        callbacks: impl IntoIterator<Item = PackCallback>,
    ) {
        self.callbacks
            .entry((position, pack_type))
            .or_default()
            .extend(callbacks);
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.values().all(Vec::is_empty)
    }

    /// Number of callbacks registered for a key.
    pub fn callback_count(&self, position: PackPosition, pack_type: PackType) -> usize {
        self.callbacks
            .get(&(position, pack_type))
            .map_or(0, Vec::len)
    }

    /// Run every callback for the key, feeding the packs they add to `sink`.
    pub fn run(
        &self,
        position: PackPosition,
        pack_type: PackType,
        sink: &mut dyn FnMut(SharedPack),
    ) {
        let Some(callbacks) = self.callbacks.get(&(position, pack_type)) else {
            return;
        };
        let mut adder = PackAdder::new(sink);
        for callback in callbacks {
            callback(&mut adder);
        }
    }

    /// Run the callbacks for the key and collect their packs in order.
    pub fn collect(&self, position: PackPosition, pack_type: PackType) -> Vec<SharedPack> {
        let mut packs = Vec::new();
        self.run(position, pack_type, &mut |pack| packs.push(pack));
        packs
    }

    /// Packs for the user pack list with the end each one goes to; bottom
    /// packs first.
    pub fn user_packs(&self, pack_type: PackType) -> Vec<(SharedPack, InsertionPosition)> {
        [PackPosition::BeforeUser, PackPosition::AfterUser]
            .into_iter()
            .flat_map(|position| {
                let end = position.user_insertion();
                self.collect(position, pack_type)
                    .into_iter()
                    .filter_map(move |pack| end.map(|end| (pack, end)))
            })
            .collect()
    }

    /// Splice the after-vanilla packs in right behind the pack with id
    /// [`VANILLA_PACK_ID`]. Without such a pack nothing happens and the
    /// callbacks are not run.
    pub fn insert_after_vanilla(&self, packs: &mut Vec<SharedPack>, pack_type: PackType) {
        let Some(index) = packs
            .iter()
            .position(|pack| pack.pack_id() == VANILLA_PACK_ID)
        else {
            return;
        };
        debug!(?pack_type, "registering after-vanilla packs");
        let tail = packs.split_off(index + 1);
        packs.extend(self.collect(PackPosition::AfterVanilla, pack_type));
        packs.extend(tail);
    }

    /// Build the final pack list around the host's `packs`.
    ///
    /// Before-all packs are prepended in registration order, after-vanilla
    /// packs follow the built-in pack, and after-all packs are appended.
    pub fn assemble(&self, packs: Vec<SharedPack>, pack_type: PackType) -> Vec<SharedPack> {
        debug!(?pack_type, "registering before-all packs");
        let mut assembled = self.collect(PackPosition::BeforeAll, pack_type);
        assembled.extend(packs);

        self.insert_after_vanilla(&mut assembled, pack_type);

        debug!(?pack_type, "registering after-all packs");
        self.run(PackPosition::AfterAll, pack_type, &mut |pack| {
            assembled.push(pack)
        });

        log_pack_list(&assembled);
        assembled
    }
}

/// Log the ids of `packs`, one per line.
pub fn log_pack_list(packs: &[SharedPack]) {
    let list: String = packs
        .iter()
        .map(|pack| format!("\n- {}", pack.pack_id()))
        .collect();
    debug!("full list of packs is now:{list}");
}
