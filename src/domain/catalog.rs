//! Conditional cost-item catalog: customs brokerage, warehouse, insurance,
//! and border-service line items.
//!
//! Brokerage and warehouse fees are legally percentage-of-value formulas
//! with statutory minimums. Until the shipment's declared value is known no
//! price exists, so formula items resolve to [`ResolvedPrice::Pending`] and
//! the caller shows the formula text instead of a number. Pending is never
//! coerced to zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::money::round_to_cents;

/// The three operation modes a quotation can cover. Eligible catalog items
/// differ per operation, so selections are not portable across them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Import,
    Export,
    Transit,
}

impl OperationType {
    /// Heading used on the printed quotation.
    pub fn title(&self) -> &'static str {
        match self {
            OperationType::Import => "IMPORTACIÓN",
            OperationType::Export => "EXPORTACIÓN",
            OperationType::Transit => "TRÁNSITO",
        }
    }
}

/// Declared-value inputs for FOB/CIF-based customs formulas.
///
/// A zero FOB or freight value means "not declared yet" and makes dependent
/// formulas non-evaluable rather than zero-cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomsContext {
    pub fob_usd: f64,
    /// Freight value used as the CIF base for destination-side formulas.
    pub cif_freight_usd: f64,
    /// Insurance rate as a fraction (0.003 = 0.30%).
    pub insurance_pct: f64,
    pub igv_pe_pct: f64,
    pub iva_ec_pct: f64,
    /// Warehouse fee in Peru, fraction of FOB (import) or CIF (export).
    pub warehouse_pe_pct: f64,
    /// Warehouse fee in Ecuador, fraction of CIF.
    pub warehouse_ec_pct: f64,
    pub warehouse_ec_base_usd: f64,
    pub weighbridge_ec_usd: f64,
    pub min_warehouse_usd: f64,
    pub min_insurance_usd: f64,
}

impl Default for CustomsContext {
    fn default() -> Self {
        Self {
            fob_usd: 0.0,
            cif_freight_usd: 0.0,
            insurance_pct: 0.003,
            igv_pe_pct: 0.18,
            iva_ec_pct: 0.15,
            warehouse_pe_pct: 0.003,
            warehouse_ec_pct: 0.0035,
            warehouse_ec_base_usd: 40.0,
            weighbridge_ec_usd: 10.0,
            min_warehouse_usd: 65.0,
            min_insurance_usd: 65.0,
        }
    }
}

impl CustomsContext {
    /// Defaults with the insurance rate the operation uses: 0.30% on import,
    /// 0.40% on export.
    pub fn for_operation(op: OperationType) -> Self {
        let mut ctx = Self::default();
        if op == OperationType::Export {
            ctx.insurance_pct = 0.004;
        }
        ctx
    }
}

/// The customs formulas the catalog knows. A closed set so rules serialize,
/// compare, and test cleanly; evaluation returns `None` when the required
/// declared value is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaKind {
    /// Warehouse Peru on import: % of FOB grossed up by IGV, with a minimum.
    ImportWarehousePe,
    /// Warehouse Ecuador on import: % of CIF plus base and weighbridge fees,
    /// grossed up by IVA, with a minimum.
    ImportWarehouseEc,
    /// Cargo insurance: FOB times the insurance rate, with a minimum.
    CargoInsurance,
    /// Warehouse Peru on export: % of CIF grossed up by IGV, no minimum.
    ExportWarehousePe,
}

impl FormulaKind {
    pub fn evaluate(&self, ctx: &CustomsContext) -> Option<f64> {
        match self {
            FormulaKind::ImportWarehousePe => {
                if ctx.fob_usd <= 0.0 {
                    return None;
                }
                let fee = ctx.fob_usd * ctx.warehouse_pe_pct;
                let grossed = fee + fee * ctx.igv_pe_pct;
                Some(ctx.min_warehouse_usd.max(grossed))
            }
            FormulaKind::ImportWarehouseEc => {
                if ctx.cif_freight_usd <= 0.0 {
                    return None;
                }
                let fee = ctx.cif_freight_usd * ctx.warehouse_ec_pct;
                let before_tax = fee + ctx.warehouse_ec_base_usd + ctx.weighbridge_ec_usd;
                let grossed = before_tax + before_tax * ctx.iva_ec_pct;
                Some(ctx.min_warehouse_usd.max(grossed))
            }
            FormulaKind::CargoInsurance => {
                if ctx.fob_usd <= 0.0 {
                    return None;
                }
                Some(ctx.min_insurance_usd.max(ctx.fob_usd * ctx.insurance_pct))
            }
            FormulaKind::ExportWarehousePe => {
                if ctx.cif_freight_usd <= 0.0 {
                    return None;
                }
                let fee = ctx.cif_freight_usd * ctx.warehouse_pe_pct;
                Some(fee + fee * ctx.igv_pe_pct)
            }
        }
    }
}

/// How a catalog item is priced. One explicit variant per source of truth;
/// no implicit fallthrough between fixed values and formulas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PricingRule {
    Fixed(f64),
    PerOperation(BTreeMap<OperationType, f64>),
    Formula(FormulaKind),
}

/// A master-catalog entry before resolution against a customs context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub id: String,
    pub label: String,
    pub unit_note: Option<String>,
    pub rule: PricingRule,
    /// Operations the item is restricted to; `None` means any.
    pub ops: Option<Vec<OperationType>>,
    pub formula_hint: Option<String>,
}

/// Resolved price of a catalog item. [`ResolvedPrice::Pending`] marks a
/// formula that cannot be evaluated yet; it is distinct from zero and is
/// excluded from totals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResolvedPrice {
    Priced(f64),
    Pending,
}

impl ResolvedPrice {
    pub fn value(&self) -> Option<f64> {
        match self {
            ResolvedPrice::Priced(value) => Some(*value),
            ResolvedPrice::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResolvedPrice::Pending)
    }
}

/// A catalog item with its price resolved for one operation and customs
/// context. This is what selection snapshots and quotations carry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCostItem {
    pub id: String,
    pub label: String,
    pub unit_note: Option<String>,
    pub price: ResolvedPrice,
    pub formula_hint: Option<String>,
}

fn fixed(id: &str, label: &str, usd: f64, unit_note: Option<&str>) -> CostItem {
    CostItem {
        id: id.to_string(),
        label: label.to_string(),
        unit_note: unit_note.map(str::to_string),
        rule: PricingRule::Fixed(usd),
        ops: None,
        formula_hint: None,
    }
}

fn per_op(id: &str, label: &str, op: OperationType, usd: f64, unit_note: Option<&str>) -> CostItem {
    CostItem {
        id: id.to_string(),
        label: label.to_string(),
        unit_note: unit_note.map(str::to_string),
        rule: PricingRule::PerOperation(BTreeMap::from([(op, usd)])),
        ops: Some(vec![op]),
        formula_hint: None,
    }
}

fn formula(id: &str, label: &str, op: OperationType, kind: FormulaKind, hint: &str) -> CostItem {
    CostItem {
        id: id.to_string(),
        label: label.to_string(),
        unit_note: Some(hint.to_string()),
        rule: PricingRule::Formula(kind),
        ops: Some(vec![op]),
        formula_hint: Some(hint.to_string()),
    }
}

/// Master list for import/export operations.
pub fn master_items() -> Vec<CostItem> {
    use FormulaKind::*;
    use OperationType::*;
    vec![
        per_op("agencia-pe", "Agencia Perú", Import, 120.0, None),
        formula(
            "bodega-pe-imp",
            "Bodega Perú",
            Import,
            ImportWarehousePe,
            "0,30% FOB + 18% IGV (Mínimo $65,00)",
        ),
        per_op("agencia-ec-imp", "Agencia Ecuador", Import, 265.0, None),
        formula(
            "bodega-ec-imp",
            "Bodega Ecuador",
            Import,
            ImportWarehouseEc,
            "0,35% CIF + $40 Base + $10 Báscula + 15% IVA (Mínimo $65,00)",
        ),
        formula(
            "seguro-imp",
            "Seguro de la carga",
            Import,
            CargoInsurance,
            "0,30% FOB (Mínimo $65,00)",
        ),
        per_op(
            "ag-adu-ec-exp",
            "Ag. Aduana Ecuador",
            Export,
            125.0,
            Some("x trámite"),
        ),
        per_op(
            "bodega-ec-exp",
            "Bodega Ecuador",
            Export,
            26.0,
            Some("x unidad"),
        ),
        per_op(
            "ag-adu-pe-exp",
            "Ag. Aduana Perú",
            Export,
            150.0,
            Some("x trámite"),
        ),
        formula(
            "bodega-pe-exp",
            "Bodega Perú",
            Export,
            ExportWarehousePe,
            "0,30% CIF + 18% IGV",
        ),
        formula(
            "seguro-exp",
            "Seguro de la carga",
            Export,
            CargoInsurance,
            "0,40% FOB (Mínimo $65,00)",
        ),
    ]
}

/// Fixed-price catalog for transit operations; no customs dependency.
pub fn transit_items() -> Vec<CostItem> {
    vec![
        fixed("mov-fron", "Movilidad Frontera", 45.0, None),
        fixed("standby", "Stand by", 240.0, Some("x día x contenedor")),
        fixed("rep-control", "Representante control", 150.0, Some("x contenedor")),
        fixed("generador", "Generador x día", 130.0, Some("x día x contenedor")),
        fixed("candado", "Candado satelital", 80.0, None),
        fixed("recep-pto", "Recepción Pto. Bolívar", 45.0, None),
        fixed(
            "horas-extra",
            "Horas extra (correspondiente al embarque)",
            10.0,
            Some("x hora x contenedor"),
        ),
        fixed("mod-docs", "Modificación documentos", 30.0, Some("x trámite")),
        fixed(
            "rep-aforo",
            "Representante para aforo narcóticos",
            180.0,
            Some("x contenedor"),
        ),
    ]
}

fn resolve_rule(rule: &PricingRule, op: OperationType, ctx: &CustomsContext) -> ResolvedPrice {
    match rule {
        PricingRule::Fixed(usd) => ResolvedPrice::Priced(*usd),
        PricingRule::PerOperation(map) => match map.get(&op) {
            Some(usd) => ResolvedPrice::Priced(*usd),
            None => ResolvedPrice::Pending,
        },
        PricingRule::Formula(kind) => match kind.evaluate(ctx) {
            Some(usd) => ResolvedPrice::Priced(round_to_cents(usd)),
            None => ResolvedPrice::Pending,
        },
    }
}

/// Resolves the eligible catalog for an operation against the customs
/// context. Transit ignores the context entirely.
pub fn resolve_catalog(op: OperationType, ctx: &CustomsContext) -> Vec<ResolvedCostItem> {
    let items = if op == OperationType::Transit {
        transit_items()
    } else {
        master_items()
            .into_iter()
            .filter(|item| match &item.ops {
                Some(ops) => ops.contains(&op),
                None => true,
            })
            .collect()
    };

    items
        .into_iter()
        .map(|item| ResolvedCostItem {
            price: resolve_rule(&item.rule, op, ctx),
            id: item.id,
            label: item.label,
            unit_note: item.unit_note,
            formula_hint: item.formula_hint,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transit_catalog_is_fixed_and_context_free() {
        let ctx = CustomsContext::default();
        let items = resolve_catalog(OperationType::Transit, &ctx);
        assert_eq!(items.len(), 9);
        assert!(items.iter().all(|item| item.price.value().is_some()));
        let standby = items.iter().find(|item| item.id == "standby").unwrap();
        assert_eq!(standby.price, ResolvedPrice::Priced(240.0));
        assert_eq!(standby.unit_note.as_deref(), Some("x día x contenedor"));
    }

    #[test]
    fn every_non_transit_item_has_price_or_hint() {
        let ctx = CustomsContext::default();
        for op in [OperationType::Import, OperationType::Export] {
            for item in resolve_catalog(op, &ctx) {
                let has_hint = item
                    .formula_hint
                    .as_deref()
                    .map(|hint| !hint.is_empty())
                    .unwrap_or(false);
                assert!(
                    item.price.value().is_some() || has_hint,
                    "item {} has neither a price nor a hint",
                    item.id
                );
            }
        }
    }

    #[test]
    fn insurance_is_pending_without_fob() {
        let ctx = CustomsContext::for_operation(OperationType::Import);
        let items = resolve_catalog(OperationType::Import, &ctx);
        let insurance = items.iter().find(|item| item.id == "seguro-imp").unwrap();
        assert!(insurance.price.is_pending());
    }

    #[test]
    fn insurance_applies_the_statutory_minimum() {
        // FOB 1000 at 0.30% is 3.00, well under the 65 USD floor.
        let mut ctx = CustomsContext::for_operation(OperationType::Import);
        ctx.fob_usd = 1000.0;
        let items = resolve_catalog(OperationType::Import, &ctx);
        let insurance = items.iter().find(|item| item.id == "seguro-imp").unwrap();
        assert_eq!(insurance.price, ResolvedPrice::Priced(65.0));
    }

    #[test]
    fn import_warehouse_pe_grosses_up_igv_over_the_minimum() {
        let mut ctx = CustomsContext::for_operation(OperationType::Import);
        ctx.fob_usd = 100_000.0;
        // 0.30% of 100 000 = 300, +18% IGV = 354.
        let items = resolve_catalog(OperationType::Import, &ctx);
        let warehouse = items.iter().find(|item| item.id == "bodega-pe-imp").unwrap();
        assert_eq!(warehouse.price, ResolvedPrice::Priced(354.0));
    }

    #[test]
    fn import_warehouse_ec_adds_base_and_weighbridge_before_iva() {
        let mut ctx = CustomsContext::for_operation(OperationType::Import);
        ctx.cif_freight_usd = 10_000.0;
        // 0.35% of 10 000 = 35, +40 base +10 báscula = 85, +15% IVA = 97.75.
        let items = resolve_catalog(OperationType::Import, &ctx);
        let warehouse = items.iter().find(|item| item.id == "bodega-ec-imp").unwrap();
        assert_eq!(warehouse.price, ResolvedPrice::Priced(97.75));
    }

    #[test]
    fn export_warehouse_pe_has_no_minimum() {
        let mut ctx = CustomsContext::for_operation(OperationType::Export);
        ctx.cif_freight_usd = 1000.0;
        // 0.30% of 1000 = 3.00, +18% IGV = 3.54.
        let items = resolve_catalog(OperationType::Export, &ctx);
        let warehouse = items.iter().find(|item| item.id == "bodega-pe-exp").unwrap();
        assert_eq!(warehouse.price, ResolvedPrice::Priced(3.54));
    }

    #[test]
    fn export_insurance_uses_the_export_rate() {
        let mut ctx = CustomsContext::for_operation(OperationType::Export);
        ctx.fob_usd = 50_000.0;
        // 0.40% of 50 000 = 200, above the 65 USD floor.
        let items = resolve_catalog(OperationType::Export, &ctx);
        let insurance = items.iter().find(|item| item.id == "seguro-exp").unwrap();
        assert_eq!(insurance.price, ResolvedPrice::Priced(200.0));
    }

    #[test]
    fn operations_see_only_their_own_items() {
        let ctx = CustomsContext::default();
        let import_ids: Vec<_> = resolve_catalog(OperationType::Import, &ctx)
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert!(import_ids.contains(&"agencia-pe".to_string()));
        assert!(!import_ids.contains(&"ag-adu-pe-exp".to_string()));

        let export_ids: Vec<_> = resolve_catalog(OperationType::Export, &ctx)
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert!(export_ids.contains(&"ag-adu-pe-exp".to_string()));
        assert!(!export_ids.contains(&"agencia-ec-imp".to_string()));
    }
}
