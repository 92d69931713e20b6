// ==========================================
// 服装制造资源计划系统 - BOM 物料合并引擎
// ==========================================
// 职责: 将多个 BOM 的行项目按 material_id 归并为物料需求清单
// 规则:
// - total_quantity / total_cost 累加
// - cost_per_unit 取首次遇到的行项目值，后续不覆盖
// - code / unit 由原材料主数据反查，材料已不存在时为空串
// - 输出顺序 = 物料首次出现顺序
// ==========================================

use crate::domain::bom::Bom;
use crate::domain::mrp::MrpMaterialRequirement;
use std::collections::HashMap;

/// 归并多个 BOM 的行项目
///
/// # 参数
/// - boms: 待合并的 BOM（调用方已确认全部 unassigned）
/// - material_lookup: material_id -> (code, unit) 反查
pub fn consolidate_material_requirements(
    boms: &[Bom],
    mut material_lookup: impl FnMut(&str) -> Option<(String, String)>,
) -> Vec<MrpMaterialRequirement> {
    let mut requirements: Vec<MrpMaterialRequirement> = Vec::new();
    let mut index_by_material: HashMap<String, usize> = HashMap::new();

    for bom in boms {
        for item in &bom.items {
            let idx = match index_by_material.get(&item.material_id) {
                Some(idx) => *idx,
                None => {
                    let (code, unit) = material_lookup(&item.material_id)
                        .unwrap_or_else(|| (String::new(), String::new()));
                    requirements.push(MrpMaterialRequirement {
                        material_id: item.material_id.clone(),
                        material_name: item.material_name.clone(),
                        material_code: code,
                        unit,
                        total_quantity: 0.0,
                        cost_per_unit: item.cost_per_unit,
                        total_cost: 0.0,
                    });
                    let idx = requirements.len() - 1;
                    index_by_material.insert(item.material_id.clone(), idx);
                    idx
                }
            };
            requirements[idx].total_quantity += item.total_consumption;
            requirements[idx].total_cost += item.total_cost;
        }
    }

    requirements
}

/// 合并结果总成本
pub fn grand_total(requirements: &[MrpMaterialRequirement]) -> f64 {
    requirements.iter().map(|req| req.total_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bom::{Bom, BomLineItem};

    fn line(material_id: &str, total_consumption: f64, cost_per_unit: f64) -> BomLineItem {
        BomLineItem {
            material_id: material_id.to_string(),
            material_name: format!("Material {}", material_id),
            avg_consumption: total_consumption,
            wastage_percent: 0.0,
            total_consumption,
            cost_per_unit,
            total_cost: total_consumption * cost_per_unit,
        }
    }

    fn bom(items: Vec<BomLineItem>) -> Bom {
        Bom::new("A1", "Polo Shirt", "C1", "Navy", items)
    }

    #[test]
    fn test_same_material_accumulates() {
        let boms = vec![bom(vec![line("M", 2.0, 5.0)]), bom(vec![line("M", 3.0, 5.0)])];
        let reqs = consolidate_material_requirements(&boms, |_| {
            Some(("MAT-M".to_string(), "meter".to_string()))
        });

        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].total_quantity, 5.0);
        assert_eq!(reqs[0].total_cost, 25.0);
        assert_eq!(reqs[0].material_code, "MAT-M");
        assert_eq!(grand_total(&reqs), 25.0);
    }

    #[test]
    fn test_cost_per_unit_first_seen_wins() {
        let boms = vec![bom(vec![line("M", 1.0, 4.0)]), bom(vec![line("M", 1.0, 9.0)])];
        let reqs = consolidate_material_requirements(&boms, |_| None);

        assert_eq!(reqs[0].cost_per_unit, 4.0);
        // 累加仍使用各行自己的 total_cost
        assert_eq!(reqs[0].total_cost, 13.0);
    }

    #[test]
    fn test_missing_material_gets_empty_code_and_unit() {
        let boms = vec![bom(vec![line("GONE", 1.0, 2.0)])];
        let reqs = consolidate_material_requirements(&boms, |_| None);

        assert_eq!(reqs[0].material_code, "");
        assert_eq!(reqs[0].unit, "");
    }

    #[test]
    fn test_output_order_is_first_encounter_order() {
        let boms = vec![
            bom(vec![line("M2", 1.0, 1.0), line("M1", 1.0, 1.0)]),
            bom(vec![line("M3", 1.0, 1.0), line("M1", 1.0, 1.0)]),
        ];
        let reqs = consolidate_material_requirements(&boms, |_| None);

        let order: Vec<&str> = reqs.iter().map(|r| r.material_id.as_str()).collect();
        assert_eq!(order, vec!["M2", "M1", "M3"]);
    }
}
