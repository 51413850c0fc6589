use crate::{Action, Arg, CrudConfig, CrudModel, Operation, Restriction, TableRef};

use crudkit_core::Result;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, OnceLock, PoisonError,
    },
};

/// Structural identity of a compiled model.
///
/// Two compile requests with equal keys share one [`CrudModel`]. The key
/// holds every input of compilation except the schema itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    prefix: String,
    op: Operation,
    tables: Vec<TableRef>,
    args: Vec<Arg>,
    restriction: Vec<(String, Restriction)>,

    /// Field name aliases of the listed tables
    aliases: Vec<(String, Vec<(String, String)>)>,
}

impl CacheKey {
    pub fn new(config: &CrudConfig, tables: &[TableRef], action: &Action) -> Self {
        Self {
            prefix: config.prefix.clone(),
            op: action.op(),
            tables: tables.to_vec(),
            args: action.args().to_vec(),
            restriction: action
                .restriction()
                .iter()
                .map(|(column, restriction)| (column.clone(), restriction.clone()))
                .collect(),
            aliases: tables
                .iter()
                .map(|table| (table.name.clone(), config.aliases_of(&table.name)))
                .collect(),
        }
    }
}

/// Process-wide, append-only model cache. Entries are never evicted; the
/// set of distinct actions is fixed by the application's configuration.
static MODELS: OnceLock<Mutex<HashMap<CacheKey, Arc<CrudModel>>>> = OnceLock::new();
static HITS: AtomicUsize = AtomicUsize::new(0);
static MISSES: AtomicUsize = AtomicUsize::new(0);

/// Counters of the model cache
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub size: usize,
}

/// Returns the model cached under `key`, compiling it with `compile` on the
/// first request.
///
/// The cache lock is held while compiling so concurrent first requests for
/// one key compile once and all observe the same model.
pub(crate) fn get_or_compile(
    key: CacheKey,
    compile: impl FnOnce() -> Result<CrudModel>,
) -> Result<Arc<CrudModel>> {
    let mut models = MODELS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(model) = models.get(&key) {
        HITS.fetch_add(1, Ordering::Relaxed);
        log::debug!("model cache hit; model={}", model.descriptor().name());
        return Ok(model.clone());
    }

    MISSES.fetch_add(1, Ordering::Relaxed);
    let model = Arc::new(compile()?);
    log::debug!(
        "model cache miss; model={} statements={}",
        model.descriptor().name(),
        model.group().len()
    );

    models.insert(key, model.clone());
    Ok(model)
}

pub fn stats() -> CacheStats {
    let size = MODELS
        .get()
        .map(|models| models.lock().unwrap_or_else(PoisonError::into_inner).len())
        .unwrap_or(0);

    CacheStats {
        hits: HITS.load(Ordering::Relaxed),
        misses: MISSES.load(Ordering::Relaxed),
        size,
    }
}
