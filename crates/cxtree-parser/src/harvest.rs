//! Attribute harvesting with per-member failure isolation.
//!
//! Each capability of an object's catalog is invoked on its own. A member
//! that answers is recorded; one that has no answer, reports a fault, or
//! panics is left out of the result and reported to the [`OmissionSink`].
//! Nothing a single member does can stop the others from being harvested.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use cxtree_core::{AttributeMap, Category, EnumMember, Flavor, Skip, Value};

use crate::catalog::{Capability, Catalog};
use crate::omission::{Omission, OmissionSink};

/// Outcome of one capability invocation.
pub type Probe = Result<Value, Skip>;

/// A foreign object whose attributes can be harvested.
pub trait Introspect {
    /// How a capability reads its value from `Self`.
    type Reader: Copy + 'static;

    /// The category's catalog, built once per process.
    fn catalog() -> &'static Catalog<Self::Reader>;

    /// Run one capability against this object.
    fn invoke(&self, capability: &Capability<Self::Reader>) -> Probe;
}

impl<T: Introspect + ?Sized> Introspect for &T {
    type Reader = T::Reader;

    fn catalog() -> &'static Catalog<Self::Reader> {
        T::catalog()
    }

    fn invoke(&self, capability: &Capability<Self::Reader>) -> Probe {
        (**self).invoke(capability)
    }
}

/// The three attribute maps harvested from one object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    pub checks: AttributeMap,
    pub derived: AttributeMap,
    pub properties: AttributeMap,
}

impl Harvest {
    /// Merge the three maps into the single map stored on a record.
    #[must_use]
    pub fn into_attributes(self) -> AttributeMap {
        let mut attributes = self.checks;
        attributes.extend(self.derived);
        attributes.extend(self.properties);
        attributes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len() + self.derived.len() + self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Invoke every capability in `T`'s catalog against `subject`.
pub fn harvest<T: Introspect>(subject: &T, sink: &mut dyn OmissionSink) -> Harvest {
    let catalog = T::catalog();
    let category = catalog.category();
    let run = |list: &[Capability<T::Reader>], sink: &mut dyn OmissionSink| {
        let mut map = AttributeMap::new();
        for capability in list {
            if let Some(value) = probe(subject, capability, category, sink) {
                map.insert(capability.name.to_string(), value);
            }
        }
        map
    };
    Harvest {
        checks: run(catalog.checks(), &mut *sink),
        derived: run(catalog.derived(), &mut *sink),
        properties: run(catalog.properties(), &mut *sink),
    }
}

/// What the front-end reports for an object that does not exist, such as
/// the type of a node that has none: `kind` is `INVALID`, `spelling` is
/// empty and every check is false. Other members have no answer.
pub fn harvest_invalid<R: Copy + 'static>(
    catalog: &Catalog<R>,
    sink: &mut dyn OmissionSink,
) -> Harvest {
    let category = catalog.category();
    let run = |list: &[Capability<R>], sink: &mut dyn OmissionSink| {
        let mut map = AttributeMap::new();
        for capability in list {
            let answer = match (capability.flavor, capability.name) {
                (Flavor::Check, _) => Ok(Value::Bool(false)),
                (_, "kind") => Ok(EnumMember::new("INVALID", 0).into()),
                (_, "spelling") => Ok(Value::from("")),
                _ => Err(Skip::NotApplicable),
            };
            if let Some(value) = record(answer, capability, category, sink) {
                map.insert(capability.name.to_string(), value);
            }
        }
        map
    };
    Harvest {
        checks: run(catalog.checks(), &mut *sink),
        derived: run(catalog.derived(), &mut *sink),
        properties: run(catalog.properties(), &mut *sink),
    }
}

thread_local! {
    static IN_CAPABILITY: Cell<bool> = const { Cell::new(false) };
}

/// Keep panics raised inside a capability off stderr. They are already
/// reported as faults to the omission sink. Panics anywhere else still reach
/// the previously installed hook. Installing more than once is a no-op.
pub fn quiet_capability_panics() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_CAPABILITY.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

fn probe<T: Introspect>(
    subject: &T,
    capability: &Capability<T::Reader>,
    category: Category,
    sink: &mut dyn OmissionSink,
) -> Option<Value> {
    IN_CAPABILITY.with(|flag| flag.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| subject.invoke(capability)))
        .unwrap_or_else(|payload| Err(Skip::Fault(panic_message(payload.as_ref()))));
    IN_CAPABILITY.with(|flag| flag.set(false));
    record(outcome, capability, category, sink)
}

fn record<R>(
    outcome: Probe,
    capability: &Capability<R>,
    category: Category,
    sink: &mut dyn OmissionSink,
) -> Option<Value> {
    match outcome {
        Ok(value) => Some(value),
        Err(skip) => {
            sink.omitted(Omission {
                category,
                flavor: capability.flavor,
                name: capability.name,
                skip,
            });
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::omission::CollectOmissions;

    struct Probed {
        width: Option<u64>,
    }

    type ProbedReader = fn(&Probed) -> Probe;

    const fn cap(
        name: &'static str,
        flavor: Flavor,
        read: ProbedReader,
    ) -> Capability<ProbedReader> {
        Capability::new(name, flavor, read)
    }

    impl Introspect for Probed {
        type Reader = ProbedReader;

        fn catalog() -> &'static Catalog<ProbedReader> {
            static CATALOG: OnceLock<Catalog<ProbedReader>> = OnceLock::new();
            CATALOG.get_or_init(|| {
                let table = vec![
                    cap("is_wide", Flavor::Check, |p| {
                        Ok(Value::Bool(p.width.is_some_and(|w| w > 8)))
                    }),
                    cap("get_width", Flavor::Get, |p| {
                        p.width.map(Value::UInt).ok_or(Skip::NotApplicable)
                    }),
                    cap("get_crash", Flavor::Get, |_| panic!("front-end crashed")),
                    cap("get_broken", Flavor::Get, |_| {
                        Err(Skip::Fault("internal error".into()))
                    }),
                    cap("spelling", Flavor::Property, |_| Ok(Value::from("p"))),
                    cap("hash", Flavor::Property, |_| Ok(Value::Int(42))),
                ];
                Catalog::from_table(Category::Node, table)
            })
        }

        fn invoke(&self, capability: &Capability<ProbedReader>) -> Probe {
            (capability.read)(self)
        }
    }

    #[test]
    fn answering_members_land_in_their_flavor_map() {
        let harvest = harvest(&Probed { width: Some(16) }, &mut CollectOmissions::new());
        assert_eq!(harvest.checks.get("is_wide"), Some(&Value::Bool(true)));
        assert_eq!(harvest.derived.get("get_width"), Some(&Value::UInt(16)));
        assert_eq!(harvest.properties.get("spelling"), Some(&Value::from("p")));
    }

    #[test]
    fn failing_members_are_omitted_and_reported() {
        let mut sink = CollectOmissions::with_faults();
        let harvest = harvest(&Probed { width: None }, &mut sink);

        assert!(!harvest.derived.contains_key("get_width"));
        assert!(!harvest.derived.contains_key("get_crash"));
        assert!(!harvest.derived.contains_key("get_broken"));
        assert_eq!(harvest.checks.get("is_wide"), Some(&Value::Bool(false)));

        let summary = sink.summary();
        assert_eq!(summary.not_applicable.get("node.get_width"), Some(&1));
        assert_eq!(summary.faults.get("node.get_crash"), Some(&1));
        assert_eq!(summary.faults.get("node.get_broken"), Some(&1));

        let crash = sink
            .faults()
            .iter()
            .find(|o| o.name == "get_crash")
            .unwrap();
        assert_eq!(crash.skip, Skip::Fault("front-end crashed".into()));
    }

    #[test]
    fn denylisted_members_are_never_invoked() {
        let harvest = harvest(&Probed { width: Some(1) }, &mut CollectOmissions::new());
        assert!(!harvest.properties.contains_key("hash"));
    }

    #[test]
    fn merged_attributes_keep_every_key() {
        let harvest = harvest(&Probed { width: Some(4) }, &mut CollectOmissions::new());
        let count = harvest.len();
        let merged = harvest.into_attributes();
        assert_eq!(merged.len(), count);
        assert_eq!(
            merged.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["get_width", "is_wide", "spelling"]
        );
    }

    #[test]
    fn invalid_objects_answer_kind_spelling_and_checks() {
        let mut sink = CollectOmissions::new();
        let harvest = harvest_invalid(Probed::catalog(), &mut sink);

        assert_eq!(harvest.checks.get("is_wide"), Some(&Value::Bool(false)));
        assert_eq!(harvest.properties.get("spelling"), Some(&Value::from("")));
        assert!(harvest.derived.is_empty());
        assert!(!harvest.properties.contains_key("hash"));

        let summary = sink.summary();
        assert_eq!(summary.not_applicable.get("node.get_width"), Some(&1));
        assert_eq!(summary.not_applicable.get("node.get_crash"), Some(&1));
        assert!(summary.faults.is_empty());
    }

    #[test]
    fn quiet_hook_keeps_panics_as_faults() {
        quiet_capability_panics();
        quiet_capability_panics();

        let mut sink = CollectOmissions::new();
        let harvest = harvest(&Probed { width: Some(9) }, &mut sink);
        assert_eq!(harvest.checks.get("is_wide"), Some(&Value::Bool(true)));
        assert_eq!(sink.summary().faults.get("node.get_crash"), Some(&1));
        assert!(!IN_CAPABILITY.with(Cell::get));
    }

    #[test]
    fn references_harvest_like_their_target() {
        let probed = Probed { width: Some(2) };
        let by_ref = harvest(&&probed, &mut CollectOmissions::new());
        assert_eq!(by_ref, harvest(&probed, &mut CollectOmissions::new()));
    }
}
