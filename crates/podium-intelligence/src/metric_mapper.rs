// ABOUTME: Resolves exercise and assessment identities to canonical metric types
// ABOUTME: Stable-code catalogue lookup first, legacy keyword heuristic as optional fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Podium Performance Contributors

//! Metric type resolution
//!
//! Resolution is a chain of [`MetricTypeResolver`]s evaluated in order; the
//! first one that returns a type wins. The default chain is:
//!
//! 1. [`CatalogResolver`]: exact lookup of a stable catalogue code
//!    (`bench_press`, `forty_yard_dash`, ...)
//! 2. [`KeywordHeuristicResolver`]: case-insensitive keyword containment over
//!    the free-text name, kept for upstream records that carry no code
//!
//! "No mapping" is a normal result, not an error.

use podium_core::models::{MetricIdentity, MetricType};
use tracing::debug;

/// Capability interface for turning an identity into a metric type
pub trait MetricTypeResolver: Send + Sync {
    /// Resolve the identity, or `None` when this resolver has no opinion
    fn resolve(&self, identity: &MetricIdentity<'_>) -> Option<MetricType>;

    /// Resolver name for logging
    fn name(&self) -> &'static str;
}

/// Stable catalogue codes and the metric type each one denotes
const CATALOG: &[(&str, MetricType)] = &[
    ("bench_press", MetricType::BenchPressMax),
    ("barbell_bench_press", MetricType::BenchPressMax),
    ("squat", MetricType::SquatMax),
    ("back_squat", MetricType::SquatMax),
    ("deadlift", MetricType::DeadliftMax),
    ("conventional_deadlift", MetricType::DeadliftMax),
    ("trap_bar_deadlift", MetricType::DeadliftMax),
    ("power_clean", MetricType::PowerCleanMax),
    ("hang_clean", MetricType::PowerCleanMax),
    ("overhead_press", MetricType::OverheadPressMax),
    ("military_press", MetricType::OverheadPressMax),
    ("strict_press", MetricType::OverheadPressMax),
    ("forty_yard_dash", MetricType::FortyYardDash),
    ("40_yard_dash", MetricType::FortyYardDash),
    ("ten_yard_split", MetricType::TenYardSplit),
    ("10_yard_split", MetricType::TenYardSplit),
    ("mile_run", MetricType::MileTime),
    ("mile_time", MetricType::MileTime),
    ("pro_agility", MetricType::ProAgilityShuttle),
    ("pro_agility_shuttle", MetricType::ProAgilityShuttle),
    ("5_10_5_shuttle", MetricType::ProAgilityShuttle),
    ("three_cone", MetricType::ThreeConeDrill),
    ("three_cone_drill", MetricType::ThreeConeDrill),
    ("l_drill", MetricType::ThreeConeDrill),
    ("vertical_jump", MetricType::VerticalJump),
    ("countermovement_jump", MetricType::VerticalJump),
    ("broad_jump", MetricType::BroadJump),
    ("standing_long_jump", MetricType::BroadJump),
    ("pull_ups", MetricType::PullUpsMax),
    ("pullups", MetricType::PullUpsMax),
    ("max_pull_ups", MetricType::PullUpsMax),
    ("body_weight", MetricType::BodyWeight),
    ("bodyweight", MetricType::BodyWeight),
    ("weigh_in", MetricType::BodyWeight),
];

/// Normalize a catalogue code: trim, lowercase, `-` and spaces to `_`
fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Exact lookup of stable catalogue codes
///
/// Also accepts canonical metric type names (`bench_press_max`) as codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogResolver;

impl CatalogResolver {
    /// Look up a single code
    #[must_use]
    pub fn lookup(code: &str) -> Option<MetricType> {
        let normalized = normalize_code(code);
        CATALOG
            .iter()
            .find(|(catalog_code, _)| *catalog_code == normalized)
            .map(|(_, metric_type)| *metric_type)
            .or_else(|| normalized.parse::<MetricType>().ok())
    }
}

impl MetricTypeResolver for CatalogResolver {
    fn resolve(&self, identity: &MetricIdentity<'_>) -> Option<MetricType> {
        identity.code.and_then(Self::lookup)
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}

/// Legacy free-text keyword matching over the identity name
///
/// Rules are evaluated in a fixed priority order and the first match wins.
/// Containment matching misclassifies unusual names, so this resolver only
/// runs after the catalogue lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHeuristicResolver;

impl KeywordHeuristicResolver {
    /// Apply the keyword rules to a name
    #[must_use]
    pub fn classify(name: &str, weight_based: bool) -> Option<MetricType> {
        let name = name.to_lowercase();
        let has = |needle: &str| name.contains(needle);
        let has_any = |needles: &[&str]| needles.iter().any(|needle| name.contains(needle));

        if has("bench press") && weight_based {
            Some(MetricType::BenchPressMax)
        } else if has("squat") {
            Some(MetricType::SquatMax)
        } else if has("deadlift") {
            Some(MetricType::DeadliftMax)
        } else if has_any(&["power clean", "hang clean"]) {
            Some(MetricType::PowerCleanMax)
        } else if has_any(&["overhead press", "military press"]) {
            Some(MetricType::OverheadPressMax)
        } else if has("vertical jump") {
            Some(MetricType::VerticalJump)
        } else if has_any(&["broad jump", "standing long jump"]) {
            Some(MetricType::BroadJump)
        } else if has("40") && has("yard") {
            Some(MetricType::FortyYardDash)
        } else if has("10") && has("yard") {
            Some(MetricType::TenYardSplit)
        } else if has("mile") {
            Some(MetricType::MileTime)
        } else if has_any(&["shuttle", "pro agility", "5-10-5"]) {
            Some(MetricType::ProAgilityShuttle)
        } else if has("cone") {
            Some(MetricType::ThreeConeDrill)
        } else if has_any(&["pull-up", "pull up", "pullup", "chin-up"]) {
            Some(MetricType::PullUpsMax)
        } else if has_any(&["body weight", "bodyweight", "weigh-in"]) {
            Some(MetricType::BodyWeight)
        } else {
            None
        }
    }
}

impl MetricTypeResolver for KeywordHeuristicResolver {
    fn resolve(&self, identity: &MetricIdentity<'_>) -> Option<MetricType> {
        let weight_based = identity
            .measurement_kind
            .is_some_and(|kind| kind.is_weight_based());
        Self::classify(identity.name, weight_based)
    }

    fn name(&self) -> &'static str {
        "keyword_heuristic"
    }
}

/// Ordered chain of resolvers
pub struct MetricTypeMapper {
    resolvers: Vec<Box<dyn MetricTypeResolver>>,
}

impl Default for MetricTypeMapper {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MetricTypeMapper {
    /// Catalogue lookup, optionally followed by the legacy keyword heuristic
    #[must_use]
    pub fn new(legacy_fallback: bool) -> Self {
        let mut resolvers: Vec<Box<dyn MetricTypeResolver>> = vec![Box::new(CatalogResolver)];
        if legacy_fallback {
            resolvers.push(Box::new(KeywordHeuristicResolver));
        }
        Self { resolvers }
    }

    /// Catalogue lookup only
    #[must_use]
    pub fn catalog_only() -> Self {
        Self::new(false)
    }

    /// Append a resolver to the end of the chain
    #[must_use]
    pub fn with_resolver(mut self, resolver: Box<dyn MetricTypeResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Resolve an identity to a metric type; `None` means "no mapping"
    #[must_use]
    pub fn map(&self, identity: &MetricIdentity<'_>) -> Option<MetricType> {
        for resolver in &self.resolvers {
            if let Some(metric_type) = resolver.resolve(identity) {
                debug!(
                    identity.name = identity.name,
                    identity.code = identity.code.unwrap_or(""),
                    resolver = resolver.name(),
                    "metric.type" = %metric_type,
                    "Resolved metric type"
                );
                return Some(metric_type);
            }
        }
        debug!(
            identity.name = identity.name,
            identity.code = identity.code.unwrap_or(""),
            "No metric type mapping"
        );
        None
    }
}
