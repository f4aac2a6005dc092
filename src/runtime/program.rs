/// Scene programs and mounting.
///
/// A [`Program`] is the ordered list of scene callables for one workbook.
/// Mounting it pairs the scenes with a fresh [`Store`]; every mount gets its
/// own store, so one program can be mounted many times independently.
/// Dispatch on a single mounted program takes `&mut self`, which serializes
/// scene invocations against its store.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::store::{Node, Store, StoreError};
use crate::schema::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("scene {scene} is out of range (program has {count} scenes)")]
    SceneOutOfRange { scene: usize, count: usize },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// One scene: runs against the mounted store with a caller-supplied
/// execution context.
pub type SceneFn<C> = Arc<dyn Fn(&mut Store, &mut C) -> Result<(), StoreError> + Send + Sync>;

pub struct Program<C> {
    scenes: Vec<SceneFn<C>>,
}

impl<C> Program<C> {
    pub fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    /// Append the next scene (builder style).
    pub fn scene<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Store, &mut C) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        self.push_scene(f);
        self
    }

    pub fn push_scene<F>(&mut self, f: F)
    where
        F: Fn(&mut Store, &mut C) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        self.scenes.push(Arc::new(f));
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Mount with a fresh store seeded from `initial`.
    pub fn mount(&self, initial: BTreeMap<String, Value>) -> MountedProgram<C> {
        MountedProgram {
            program: self.clone(),
            store: Store::new(initial),
        }
    }
}

impl<C> Default for Program<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Program<C> {
    fn clone(&self) -> Self {
        Self {
            scenes: self.scenes.clone(),
        }
    }
}

impl<C> fmt::Debug for Program<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("scenes", &self.scenes.len())
            .finish()
    }
}

/// A program bound to its own store.
#[derive(Debug)]
pub struct MountedProgram<C> {
    program: Program<C>,
    store: Store,
}

impl<C> MountedProgram<C> {
    /// Run scene `scene_number` (1-based) with `ctx` as its execution context.
    pub fn dispatch(&mut self, scene_number: usize, ctx: &mut C) -> Result<(), RuntimeError> {
        let count = self.program.scenes.len();
        let scene = scene_number
            .checked_sub(1)
            .and_then(|index| self.program.scenes.get(index))
            .ok_or(RuntimeError::SceneOutOfRange {
                scene: scene_number,
                count,
            })?;
        scene(&mut self.store, ctx)?;
        Ok(())
    }

    /// Read-only handle on the map at `path` in this mount's store.
    pub fn connect_store<S: AsRef<str>>(&self, path: &[S]) -> Result<Node<'_>, StoreError> {
        self.store.connect(path)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn scene_count(&self) -> usize {
        self.program.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> Program<Vec<String>> {
        Program::new()
            .scene(|store, log: &mut Vec<String>| {
                store.root_mut()?.set("count", 1i64);
                log.push("one".to_string());
                Ok(())
            })
            .scene(|store, log: &mut Vec<String>| {
                let mut root = store.root_mut()?;
                let next = match root.get("count") {
                    Some(Value::Int(n)) => n + 1,
                    _ => 0,
                };
                root.set("count", next);
                log.push("two".to_string());
                Ok(())
            })
    }

    #[test]
    fn store_is_readable_before_any_scene() {
        let initial = BTreeMap::from([("x".to_string(), Value::Int(1))]);
        let mounted = counter().mount(initial);
        let root = mounted.connect_store(&["root"]).unwrap();
        assert_eq!(root.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn dispatch_is_one_based() {
        let mut mounted = counter().mount(BTreeMap::new());
        let mut log = Vec::new();
        mounted.dispatch(1, &mut log).unwrap();
        mounted.dispatch(2, &mut log).unwrap();
        assert_eq!(log, vec!["one", "two"]);
        assert_eq!(
            mounted.store().root().unwrap().get("count"),
            Some(&Value::Int(2))
        );
    }

    #[test]
    fn out_of_range_scenes_are_rejected() {
        let mut mounted = counter().mount(BTreeMap::new());
        let mut log = Vec::new();
        assert_eq!(
            mounted.dispatch(0, &mut log),
            Err(RuntimeError::SceneOutOfRange { scene: 0, count: 2 })
        );
        assert_eq!(
            mounted.dispatch(3, &mut log),
            Err(RuntimeError::SceneOutOfRange { scene: 3, count: 2 })
        );
        assert!(log.is_empty());
    }

    #[test]
    fn mounts_do_not_share_stores() {
        let program = counter();
        let mut a = program.mount(BTreeMap::new());
        let b = program.mount(BTreeMap::new());
        a.dispatch(1, &mut Vec::new()).unwrap();
        assert_eq!(a.store().root().unwrap().get("count"), Some(&Value::Int(1)));
        assert_eq!(b.store().root().unwrap().get("count"), None);
    }

    #[test]
    fn store_errors_surface_from_scenes() {
        let program: Program<()> =
            Program::new().scene(|store, _| store.connect_mut(&["root", "nope"]).map(|_| ()));
        let mut mounted = program.mount(BTreeMap::new());
        assert!(matches!(
            mounted.dispatch(1, &mut ()),
            Err(RuntimeError::Store(StoreError::MissingSegment { .. }))
        ));
    }
}
