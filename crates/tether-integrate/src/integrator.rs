use std::sync::Arc;

use itertools::Itertools;
use tether_core::{ColumnSet, JoinInstruction, Record, TableCache};
use tether_error::{Error, ErrorPolicy, Result, TracingPolicy};

use crate::association::{classify, group_by_alias, Association};
use crate::config::{IntegrateConfig, ParentColumnRule};
use crate::join::{left_outer_join, roots};
use crate::populate::populate;
use crate::result::{rows_to_json, PopulatedRow};
use crate::sanitize::{sanitize_many_to_many, sanitize_one_to_many, LinkedRow};
use crate::validate::{self, Anchor};

/// Combines per-table fetch results into parent rows carrying their
/// associations.
///
/// The cache is only borrowed: parent rows are copied into the result, so the
/// caller's cache is unchanged after a call.
#[derive(Clone)]
pub struct Integrator {
    config: IntegrateConfig,
    policy: Arc<dyn ErrorPolicy>,
}

impl std::fmt::Debug for Integrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integrator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(IntegrateConfig::default())
    }
}

/// Per-alias work decided before any join runs.
enum Plan<'j> {
    Run(Association<'j>),
    /// Lenient mode: the alias could not be classified and is populated empty.
    Skip(&'j str),
}

impl<'j> Plan<'j> {
    fn alias(&self) -> &'j str {
        match *self {
            Plan::Run(association) => association.alias(),
            Plan::Skip(alias) => alias,
        }
    }
}

impl Integrator {
    pub fn new(config: IntegrateConfig) -> Self {
        Self {
            config,
            policy: Arc::new(TracingPolicy),
        }
    }

    /// Replace the policy that receives errors the integrator does not return
    /// (associations skipped in lenient mode).
    pub fn with_policy(mut self, policy: impl ErrorPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn config(&self) -> &IntegrateConfig {
        &self.config
    }

    /// Populate every alias named in `instructions` onto the rows of the
    /// first instruction's parent table.
    ///
    /// All validation (instruction shape, association classification, table
    /// presence) happens before the first join, so an `Err` never comes with
    /// partial work. Parent row order and contents are preserved.
    pub fn integrate(
        &self,
        cache: &TableCache,
        instructions: &[JoinInstruction],
    ) -> Result<Vec<PopulatedRow>> {
        let anchor = validate::check_instructions(cache, instructions)?;
        let plans = self.plan(instructions, anchor.table)?;
        let runnable: Vec<Association<'_>> = plans
            .iter()
            .filter_map(|plan| match plan {
                Plan::Run(association) => Some(*association),
                Plan::Skip(_) => None,
            })
            .collect();
        validate::check_tables(cache, &runnable, self.config.missing_tables)?;

        tracing::debug!(
            parent = anchor.table,
            parent_key = anchor.key,
            parent_rows = anchor.rows.len(),
            aliases = %plans.iter().map(Plan::alias).join(", "),
            "integrating"
        );

        let omit = self.omitted_columns(&anchor);
        let mut results: Vec<PopulatedRow> =
            anchor.rows.iter().cloned().map(PopulatedRow::new).collect();

        for plan in &plans {
            match plan {
                Plan::Run(association) => {
                    let linked = self.join_association(cache, association, &anchor, &omit);
                    populate(&mut results, association.alias(), linked, anchor.key);
                }
                Plan::Skip(alias) => populate(&mut results, alias, Vec::new(), anchor.key),
            }
        }
        Ok(results)
    }

    /// Decode, validate and integrate a raw JSON request
    /// (`{ "cache": {...}, "joinInstructions": [...] }`), returning the
    /// populated rows as a JSON array.
    pub fn integrate_json(&self, request: &serde_json::Value) -> Result<serde_json::Value> {
        let request = validate::request_from_json(request)?;
        let rows = self.integrate(&request.cache, &request.join_instructions)?;
        rows_to_json(&rows)
    }

    /// Same as [`Integrator::integrate`], but yields to the tokio scheduler once
    /// before doing any work, so the caller's current task turn is never
    /// spent on the computation.
    pub async fn integrate_deferred(
        &self,
        cache: TableCache,
        instructions: Vec<JoinInstruction>,
    ) -> Result<Vec<PopulatedRow>> {
        tokio::task::yield_now().await;
        self.integrate(&cache, &instructions)
    }

    fn plan<'j>(&self, instructions: &'j [JoinInstruction], parent: &str) -> Result<Vec<Plan<'j>>> {
        let mut plans = Vec::new();
        for (alias, group) in group_by_alias(instructions) {
            match classify(alias, &group, parent) {
                Ok(association) => plans.push(Plan::Run(association)),
                Err(e) if self.config.strict_associations => return Err(e.into()),
                Err(e) => {
                    self.policy.emit(&Error::from(e));
                    plans.push(Plan::Skip(alias));
                }
            }
        }
        Ok(plans)
    }

    fn omitted_columns(&self, anchor: &Anchor<'_>) -> ColumnSet {
        match self.config.parent_columns {
            ParentColumnRule::Provenance => ColumnSet::new(),
            ParentColumnRule::ByName => anchor
                .rows
                .first()
                .map(Record::column_set)
                .unwrap_or_default(),
        }
    }

    fn join_association(
        &self,
        cache: &TableCache,
        association: &Association<'_>,
        anchor: &Anchor<'_>,
        omit: &ColumnSet,
    ) -> Vec<LinkedRow> {
        let table = |name: &str| cache.table(name).unwrap_or_default();
        let linked = match *association {
            Association::OneToMany { join, .. } => {
                let joined = left_outer_join(
                    roots(anchor.rows),
                    table(join.child.as_str()),
                    &join.parent_key,
                    &join.child_key,
                );
                sanitize_one_to_many(joined, anchor.key, &join.child_key, omit)
            }
            Association::ManyToMany {
                through, target, ..
            } => {
                let via_junction = left_outer_join(
                    roots(anchor.rows),
                    table(through.child.as_str()),
                    &through.parent_key,
                    &through.child_key,
                );
                let joined = left_outer_join(
                    via_junction,
                    table(target.child.as_str()),
                    &target.parent_key,
                    &target.child_key,
                );
                if tracing::enabled!(tracing::Level::TRACE) {
                    for row in &joined {
                        tracing::trace!(alias = association.alias(), merged = ?row.merged(), "joined row");
                    }
                }
                sanitize_many_to_many(
                    joined,
                    anchor.key,
                    &target.parent_key,
                    &target.child_key,
                    omit,
                )
            }
        };
        tracing::debug!(
            alias = association.alias(),
            kind = association.kind(),
            rows = linked.len(),
            "joined association"
        );
        linked
    }
}

/// Integrate with the default configuration.
pub fn integrate(cache: &TableCache, instructions: &[JoinInstruction]) -> Result<Vec<PopulatedRow>> {
    Integrator::default().integrate(cache, instructions)
}
