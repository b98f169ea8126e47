// ==========================================
// Voltway Industrial OS - Catalog snapshot
// ==========================================
// Responsibility: immutable point-in-time view of the catalog
// Boundary: raw rows are validated here; engines only see clean data
// Rule: never mutated after build; shared as Arc<CatalogSnapshot>
// ==========================================

use crate::domain::order::{PurchaseOrder, SalesOrder};
use crate::domain::part::Part;
use crate::domain::product::{BomLine, Product};
use crate::domain::reorder::{DispatchParameter, ReorderConfig};
use crate::domain::stock::StockRecord;
use crate::domain::supplier::SupplierOffer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU64;

// ==========================================
// CatalogData - raw rows from a source
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    pub parts: Vec<Part>,
    pub products: Vec<Product>,
    pub bom_lines: Vec<BomLine>,
    pub stock: Vec<StockRecord>,
    pub dispatch_parameters: Vec<DispatchParameter>,
    pub supplier_offers: Vec<SupplierOffer>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub sales_orders: Vec<SalesOrder>,
}

/// Which stock records count toward availability
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StockScope {
    /// Sum over every location (part-level view)
    #[default]
    AllLocations,
    /// One location only
    Location(String),
}

/// Validated BOM requirement; quantity is strictly positive by construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomRequirement {
    pub part_id: String,
    pub quantity: NonZeroU64,
    pub notes: Option<String>,
}

/// BOM line rejected at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    pub part_id: String,
    pub quantity: i64,
}

/// Problems found while building a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotIssue {
    MalformedBomLine {
        product_id: String,
        part_id: String,
        quantity: i64,
    },
    NegativeStock {
        part_id: String,
        location: String,
        quantity: i64,
    },
    InvalidReorderConfig {
        part_id: String,
        reason: String,
    },
    DanglingSuccessor {
        part_id: String,
        successor: String,
    },
    /// BOM line names a part missing from the part master
    UnknownBomPart {
        product_id: String,
        part_id: String,
    },
}

// ==========================================
// CatalogSnapshot
// ==========================================
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    captured_at: DateTime<Utc>,
    parts: BTreeMap<String, Part>,
    products: BTreeMap<String, Product>,
    bom: HashMap<String, Vec<BomRequirement>>,
    malformed_bom: HashMap<String, Vec<MalformedLine>>,
    unknown_bom_parts: HashMap<String, Vec<String>>,
    bom_line_count: usize,
    stock_rows: Vec<StockRecord>,
    stock_by_part: HashMap<String, Vec<StockRecord>>,
    reorder: HashMap<String, ReorderConfig>,
    offers_by_part: HashMap<String, Vec<SupplierOffer>>,
    supplier_offers: Vec<SupplierOffer>,
    purchase_orders: Vec<PurchaseOrder>,
    sales_orders: Vec<SalesOrder>,
    issues: Vec<SnapshotIssue>,
}

impl CatalogSnapshot {
    /// Build a snapshot stamped with the current time
    pub fn build(data: CatalogData) -> Self {
        Self::build_at(data, Utc::now())
    }

    /// Validate and index raw rows
    ///
    /// # Rules
    /// - BOM quantity <= 0 → line withheld from the evaluator, recorded per product
    /// - BOM part not in the part master → line withheld, recorded per product
    /// - stock quantity < 0 → record dropped
    /// - config_data without a usable threshold → part has no ReorderConfig
    /// - successor not in the part master → kept, reported (advisory only)
    pub fn build_at(data: CatalogData, captured_at: DateTime<Utc>) -> Self {
        let mut issues = Vec::new();

        let parts: BTreeMap<String, Part> = data
            .parts
            .into_iter()
            .map(|p| (p.part_id.clone(), p))
            .collect();

        for part in parts.values() {
            for successor in &part.successor_parts {
                if !parts.contains_key(successor) {
                    issues.push(SnapshotIssue::DanglingSuccessor {
                        part_id: part.part_id.clone(),
                        successor: successor.clone(),
                    });
                }
            }
        }

        let products: BTreeMap<String, Product> = data
            .products
            .into_iter()
            .map(|p| (p.product_id.clone(), p))
            .collect();

        // ===== BOM =====
        let mut bom: HashMap<String, Vec<BomRequirement>> = HashMap::new();
        let mut malformed_bom: HashMap<String, Vec<MalformedLine>> = HashMap::new();
        let mut unknown_bom_parts: HashMap<String, Vec<String>> = HashMap::new();
        let mut bom_line_count = 0;
        for line in data.bom_lines {
            if !parts.contains_key(&line.part_id) {
                issues.push(SnapshotIssue::UnknownBomPart {
                    product_id: line.product_id.clone(),
                    part_id: line.part_id.clone(),
                });
                unknown_bom_parts
                    .entry(line.product_id)
                    .or_default()
                    .push(line.part_id);
                continue;
            }
            let accepted = u64::try_from(line.quantity).ok().and_then(NonZeroU64::new);
            match accepted {
                Some(quantity) => {
                    bom_line_count += 1;
                    bom.entry(line.product_id).or_default().push(BomRequirement {
                        part_id: line.part_id,
                        quantity,
                        notes: line.notes,
                    });
                }
                None => {
                    issues.push(SnapshotIssue::MalformedBomLine {
                        product_id: line.product_id.clone(),
                        part_id: line.part_id.clone(),
                        quantity: line.quantity,
                    });
                    malformed_bom.entry(line.product_id).or_default().push(MalformedLine {
                        part_id: line.part_id,
                        quantity: line.quantity,
                    });
                }
            }
        }

        // ===== Stock =====
        let mut stock_rows = Vec::with_capacity(data.stock.len());
        let mut stock_by_part: HashMap<String, Vec<StockRecord>> = HashMap::new();
        for record in data.stock {
            if record.quantity_available < 0 {
                issues.push(SnapshotIssue::NegativeStock {
                    part_id: record.part_id.clone(),
                    location: record.location.clone(),
                    quantity: record.quantity_available,
                });
                continue;
            }
            stock_by_part
                .entry(record.part_id.clone())
                .or_default()
                .push(record.clone());
            stock_rows.push(record);
        }

        // ===== Reorder configuration =====
        let mut reorder = HashMap::new();
        for param in &data.dispatch_parameters {
            match ReorderConfig::from_dispatch(param) {
                Ok(cfg) => {
                    reorder.insert(cfg.part_id.clone(), cfg);
                }
                Err(e) => issues.push(SnapshotIssue::InvalidReorderConfig {
                    part_id: param.part_id.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        // ===== Supplier catalog =====
        let mut offers_by_part: HashMap<String, Vec<SupplierOffer>> = HashMap::new();
        for offer in &data.supplier_offers {
            offers_by_part
                .entry(offer.part_id.clone())
                .or_default()
                .push(offer.clone());
        }

        for issue in &issues {
            tracing::warn!(?issue, "snapshot validation issue");
        }

        Self {
            captured_at,
            parts,
            products,
            bom,
            malformed_bom,
            unknown_bom_parts,
            bom_line_count,
            stock_rows,
            stock_by_part,
            reorder,
            offers_by_part,
            supplier_offers: data.supplier_offers,
            purchase_orders: data.purchase_orders,
            sales_orders: data.sales_orders,
            issues,
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn issues(&self) -> &[SnapshotIssue] {
        &self.issues
    }

    // ===== Master data =====

    pub fn part(&self, part_id: &str) -> Option<&Part> {
        self.parts.get(part_id)
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Products ordered by product_id
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    // ===== BOM =====

    /// Accepted BOM lines of a product (empty if none recorded)
    pub fn bom_lines(&self, product_id: &str) -> &[BomRequirement] {
        self.bom.get(product_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lines rejected for this product at build time
    pub fn malformed_lines(&self, product_id: &str) -> &[MalformedLine] {
        self.malformed_bom
            .get(product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// BOM parts of this product missing from the part master
    pub fn unknown_bom_parts(&self, product_id: &str) -> &[String] {
        self.unknown_bom_parts
            .get(product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bom_line_count(&self) -> usize {
        self.bom_line_count
    }

    // ===== Stock =====

    /// Stock rows in source order
    pub fn stock_rows(&self) -> &[StockRecord] {
        &self.stock_rows
    }

    pub fn stock_records(&self, part_id: &str) -> &[StockRecord] {
        self.stock_by_part
            .get(part_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Available quantity for a part; no record means 0
    pub fn stock_for(&self, part_id: &str, scope: &StockScope) -> u64 {
        self.stock_records(part_id)
            .iter()
            .filter(|r| match scope {
                StockScope::AllLocations => true,
                StockScope::Location(loc) => &r.location == loc,
            })
            .map(|r| r.quantity_available.max(0) as u64)
            .sum()
    }

    /// Part ids with at least one stock row, sorted
    pub fn stocked_part_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.stock_by_part.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    // ===== Reorder =====

    pub fn reorder_config(&self, part_id: &str) -> Option<&ReorderConfig> {
        self.reorder.get(part_id)
    }

    pub fn reorder_configs(&self) -> impl Iterator<Item = &ReorderConfig> {
        self.reorder.values()
    }

    // ===== Suppliers & orders =====

    pub fn offers_for(&self, part_id: &str) -> &[SupplierOffer] {
        self.offers_by_part
            .get(part_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn supplier_offers(&self) -> &[SupplierOffer] {
        &self.supplier_offers
    }

    pub fn purchase_orders(&self) -> &[PurchaseOrder] {
        &self.purchase_orders
    }

    pub fn sales_orders(&self) -> &[SalesOrder] {
        &self.sales_orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn data() -> CatalogData {
        CatalogData {
            parts: vec![
                Part::new("P300", "500W Brushless Motor", "assembly", 3.79).with_successors(&["P304"]),
                Part::new("P301", "Li-Ion 36V 10Ah Battery", "assembly", 4.84)
                    .with_successors(&["P999"]),
                Part::new("P304", "750W Brushless Motor", "assembly", 3.31),
            ],
            products: vec![Product {
                product_id: "S1_V1".to_string(),
                model: "S1".to_string(),
                version: "V1".to_string(),
                product_name: "Voltway S1 Standard".to_string(),
            }],
            bom_lines: vec![
                BomLine::new("S1_V1", "P300", 1),
                BomLine::new("S1_V1", "P301", 0),
            ],
            stock: vec![
                StockRecord::new("P300", "WH1", 100),
                StockRecord::new("P300", "WH2", 58),
                StockRecord::new("P301", "WH1", -3),
            ],
            dispatch_parameters: vec![
                DispatchParameter {
                    part_id: "P300".to_string(),
                    config_data: json!({"min_stock": 50, "reorder_qty": 100}),
                    updated_at: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                },
                DispatchParameter {
                    part_id: "P301".to_string(),
                    config_data: json!({"reorder_qty": 10}),
                    updated_at: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_build_withholds_malformed_bom_lines() {
        let snap = CatalogSnapshot::build(data());
        assert_eq!(snap.bom_lines("S1_V1").len(), 1);
        assert_eq!(snap.bom_line_count(), 1);
        assert_eq!(
            snap.malformed_lines("S1_V1"),
            &[MalformedLine {
                part_id: "P301".to_string(),
                quantity: 0
            }]
        );
        assert!(snap.issues().iter().any(|i| matches!(
            i,
            SnapshotIssue::MalformedBomLine { quantity: 0, .. }
        )));
    }

    #[test]
    fn test_stock_sums_locations_and_drops_negative() {
        let snap = CatalogSnapshot::build(data());
        assert_eq!(snap.stock_for("P300", &StockScope::AllLocations), 158);
        assert_eq!(snap.stock_for("P300", &StockScope::Location("WH2".to_string())), 58);
        assert_eq!(snap.stock_for("P301", &StockScope::AllLocations), 0);
        assert_eq!(snap.stock_for("NOPE", &StockScope::AllLocations), 0);
        assert_eq!(snap.stock_rows().len(), 2);
    }

    #[test]
    fn test_reorder_config_typed_at_boundary() {
        let snap = CatalogSnapshot::build(data());
        assert_eq!(snap.reorder_config("P300").unwrap().minimum_stock_threshold, 50);
        // threshold missing → no config, never an implicit zero
        assert!(snap.reorder_config("P301").is_none());
        assert!(snap.issues().iter().any(|i| matches!(
            i,
            SnapshotIssue::InvalidReorderConfig { part_id, .. } if part_id == "P301"
        )));
    }

    #[test]
    fn test_unknown_bom_part_withheld() {
        let mut raw = data();
        raw.bom_lines.push(BomLine::new("S1_V1", "GHOST", 1));
        let snap = CatalogSnapshot::build(raw);

        assert_eq!(snap.bom_lines("S1_V1").len(), 1);
        assert_eq!(snap.unknown_bom_parts("S1_V1"), &["GHOST".to_string()]);
        assert!(snap.issues().contains(&SnapshotIssue::UnknownBomPart {
            product_id: "S1_V1".to_string(),
            part_id: "GHOST".to_string(),
        }));
    }

    #[test]
    fn test_dangling_successor_is_advisory() {
        let snap = CatalogSnapshot::build(data());
        assert!(snap.part("P301").is_some());
        assert!(snap.issues().contains(&SnapshotIssue::DanglingSuccessor {
            part_id: "P301".to_string(),
            successor: "P999".to_string(),
        }));
    }
}
