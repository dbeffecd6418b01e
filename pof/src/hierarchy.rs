use crate::{
    bsp::BspData,
    consts::DEBRIS_DETAIL,
    error::{PofError, Result},
    model::{PofModel, SubObject},
};

/// Folds the geometry decoded for sub-object `index` into the model's global
/// pools. Vertices move into root-relative space, and polygon indices are
/// rebased onto the pools as they were before this merge.
pub fn merge_bsp(model: &mut PofModel, index: usize, bsp: BspData) -> Result<()> {
    let offset = model.subobjs[index].offset;

    let vertex_count = bsp.vertices.len();
    let normal_count = bsp.normals.len();

    for polygon in &bsp.polygons {
        check_indices(&polygon.vertices, vertex_count, "vertex")?;
        check_indices(&polygon.normals, normal_count, "normal")?;
    }

    let base_vertex = model.vertices.len();
    let base_normal = model.normals.len();

    model
        .vertices
        .extend(bsp.vertices.into_iter().map(|v| v + offset));
    model
        .subobj_indices
        .resize(model.subobj_indices.len() + vertex_count, index);
    model.normals.extend(bsp.normals);

    model
        .polygons
        .extend(bsp.polygons.into_iter().map(|mut polygon| {
            polygon.subobj_index = index;
            polygon.vertices.iter_mut().for_each(|v| *v += base_vertex);
            polygon.normals.iter_mut().for_each(|n| *n += base_normal);
            polygon
        }));

    model
        .boxes
        .extend(bsp.boxes.into_iter().map(|b| b.translated(offset)));

    log::debug!(
        "merged sub-object {index} : {vertex_count} vertices at {base_vertex}, {normal_count} normals at {base_normal}"
    );
    Ok(())
}

fn check_indices(indices: &[usize], count: usize, what: &'static str) -> Result<()> {
    match indices.iter().find(|&&i| i >= count) {
        Some(&index) => Err(PofError::PolygonIndex { what, index, count }),
        None => Ok(()),
    }
}

/// Assigns every sub-object its detail level: detail list entries get their
/// position in the list, debris gets [`DEBRIS_DETAIL`], and every child copies
/// the level of the root of its tree.
pub fn resolve_details(model: &mut PofModel) -> Result<()> {
    let count = model.subobjs.len();

    for subobj in &mut model.subobjs {
        subobj.detail = None;
    }

    for (detail, &index) in model.detail_subobjs.iter().enumerate() {
        let i = subobj_index(index, count, "detail")?;
        model.subobjs[i].detail = Some(detail as u32);
    }

    for &index in &model.debris_subobjs {
        let i = subobj_index(index, count, "debris")?;
        model.subobjs[i].detail = Some(DEBRIS_DETAIL);
    }

    for i in 0..count {
        if model.subobjs[i].parent.is_some() {
            let root = find_root(&model.subobjs, i)?;
            model.subobjs[i].detail = model.subobjs[root].detail;
        }
    }
    Ok(())
}

fn subobj_index(index: i32, count: usize, what: &'static str) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < count)
        .ok_or(PofError::SubObjectIndex { what, index, count })
}

/// Walks parent links up to the root. The walk is bounded by the number of
/// sub-objects, so a hand-built cycle is reported instead of looping.
pub fn find_root(subobjs: &[SubObject], start: usize) -> Result<usize> {
    let mut index = start;
    for _ in 0..=subobjs.len() {
        match subobjs.get(index).map(|s| s.parent) {
            Some(Some(parent)) => index = parent,
            Some(None) => return Ok(index),
            None => break,
        }
    }
    Err(PofError::UnresolvedRoot(start))
}

#[cfg(test)]
mod hierarchy_tests {
    use glam::{vec3, Vec3};

    use crate::model::{BoundingBox, Polygon, PolygonKind};

    use super::*;

    fn subobj(parent: Option<usize>, offset: Vec3) -> SubObject {
        SubObject {
            parent,
            offset,
            raw_offset: offset,
            ..Default::default()
        }
    }

    fn triangle(vertices: [usize; 3], normals: [usize; 3]) -> Polygon {
        Polygon {
            kind: PolygonKind::Flat { color: 0 },
            subobj_index: 0,
            center: Vec3::ZERO,
            normal: Vec3::Z,
            radius: 1.0,
            vertices: vertices.to_vec(),
            normals: normals.to_vec(),
        }
    }

    fn tree() -> PofModel {
        // 0 and 3 are roots; 1 -> 0, 2 -> 1, 4 -> 3; 5 is a lone root
        PofModel {
            subobjs: vec![
                subobj(None, Vec3::ZERO),
                subobj(Some(0), Vec3::ZERO),
                subobj(Some(1), Vec3::ZERO),
                subobj(None, Vec3::ZERO),
                subobj(Some(3), Vec3::ZERO),
                subobj(None, Vec3::ZERO),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn children_inherit_root_detail() {
        let mut model = tree();
        model.detail_subobjs = vec![3, 0];
        model.debris_subobjs = vec![5];

        resolve_details(&mut model).unwrap();

        let details: Vec<_> = model.subobjs.iter().map(|s| s.detail).collect();
        assert_eq!(
            details,
            vec![Some(1), Some(1), Some(1), Some(0), Some(0), Some(DEBRIS_DETAIL)]
        );
    }

    #[test]
    fn trees_without_detail_stay_unresolved() {
        let mut model = tree();
        model.detail_subobjs = vec![0];
        model.subobjs[4].detail = Some(7);

        resolve_details(&mut model).unwrap();

        assert_eq!(model.subobjs[2].detail, Some(0));
        assert_eq!(model.subobjs[3].detail, None);
        assert_eq!(model.subobjs[4].detail, None);
    }

    #[test]
    fn detail_index_out_of_range() {
        let mut model = tree();
        model.detail_subobjs = vec![6];
        assert!(matches!(
            resolve_details(&mut model),
            Err(PofError::SubObjectIndex { index: 6, count: 6, .. })
        ));

        model.detail_subobjs.clear();
        model.debris_subobjs = vec![-2];
        assert!(matches!(
            resolve_details(&mut model),
            Err(PofError::SubObjectIndex { index: -2, .. })
        ));
    }

    #[test]
    fn cycles_do_not_reach_a_root() {
        let subobjs = vec![subobj(Some(1), Vec3::ZERO), subobj(Some(0), Vec3::ZERO)];
        assert!(matches!(
            find_root(&subobjs, 0),
            Err(PofError::UnresolvedRoot(0))
        ));

        let dangling = vec![subobj(Some(4), Vec3::ZERO)];
        assert!(matches!(
            find_root(&dangling, 0),
            Err(PofError::UnresolvedRoot(0))
        ));
    }

    #[test]
    fn merge_rebases_into_global_pools() {
        let mut model = PofModel {
            subobjs: vec![
                subobj(None, Vec3::ZERO),
                subobj(Some(0), vec3(10.0, 0.0, 0.0)),
            ],
            ..Default::default()
        };

        let first = BspData {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z],
            polygons: vec![triangle([0, 1, 2], [0, 0, 0])],
            boxes: vec![],
        };
        merge_bsp(&mut model, 0, first).unwrap();

        let second = BspData {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            normals: vec![Vec3::X, Vec3::Y],
            polygons: vec![triangle([3, 1, 0], [1, 0, 1])],
            boxes: vec![BoundingBox {
                min: Vec3::ZERO,
                max: Vec3::ONE,
            }],
        };
        merge_bsp(&mut model, 1, second).unwrap();

        assert_eq!(model.vertices.len(), 7);
        assert_eq!(model.vertices[3], vec3(10.0, 0.0, 0.0));
        assert_eq!(model.vertices[6], vec3(10.0, 0.0, 1.0));
        assert_eq!(model.subobj_indices, vec![0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(model.normals.len(), 3);

        let poly = &model.polygons[1];
        assert_eq!(poly.subobj_index, 1);
        assert_eq!(poly.vertices, vec![6, 4, 3]);
        assert_eq!(poly.normals, vec![2, 1, 2]);
        for &v in &poly.vertices {
            assert!((3..7).contains(&v));
        }

        assert_eq!(
            model.boxes,
            vec![BoundingBox {
                min: vec3(10.0, 0.0, 0.0),
                max: vec3(11.0, 1.0, 1.0),
            }]
        );
    }

    #[test]
    fn merge_rejects_foreign_indices() {
        let mut model = PofModel {
            subobjs: vec![subobj(None, Vec3::ZERO)],
            ..Default::default()
        };
        let bsp = BspData {
            vertices: vec![Vec3::ZERO; 3],
            normals: vec![Vec3::Z],
            polygons: vec![triangle([0, 1, 2], [0, 1, 0])],
            boxes: vec![],
        };
        assert!(matches!(
            merge_bsp(&mut model, 0, bsp),
            Err(PofError::PolygonIndex {
                what: "normal",
                index: 1,
                count: 1
            })
        ));
        assert!(model.vertices.is_empty());
    }
}
