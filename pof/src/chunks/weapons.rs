use std::io::{BufReader, Read, Seek};

use glam::Vec3;

use crate::{
    binaries::{read_count, read_list, BinaryData},
    error::Result,
    model::{GunPoint, PofModel, TurretBank, WeaponClass, WeaponKind, WeaponMount},
};

// Every firing point is stored twice: once in its bank table and once in the
// flat weapon list. A repeated chunk replaces the table but keeps appending to
// the list.

/// `GPNT` and `MPNT`: banks of fixed firing points.
pub fn read_gun_points<R: Read + Seek>(
    buffer: &mut BufReader<R>,
    class: WeaponClass,
    model: &mut PofModel,
) -> Result<()> {
    let kind = match class {
        WeaponClass::Primary => WeaponKind::Gun,
        WeaponClass::Secondary => WeaponKind::Missile,
    };

    let n = read_count(buffer, "gun bank count")?;
    log::info!("{kind:?} banks : {n}");

    let mut banks = Vec::new();
    for bank in 0..n {
        let points = read_list(buffer, "firing point count", GunPoint::read)?;

        model
            .weapons
            .extend(points.iter().map(|point| WeaponMount {
                pos: point.pos,
                normal: point.normal,
                subobj: 0,
                kind,
                bank,
            }));
        banks.push(points);
    }

    *model.gun_banks.get_mut(class) = banks;
    Ok(())
}

/// `TGUN` and `TMIS`: turret banks, one normal shared by every position.
pub fn read_turrets<R: Read + Seek>(
    buffer: &mut BufReader<R>,
    class: WeaponClass,
    model: &mut PofModel,
) -> Result<()> {
    let kind = match class {
        WeaponClass::Primary => WeaponKind::GunTurret,
        WeaponClass::Secondary => WeaponKind::MissileTurret,
    };

    let n = read_count(buffer, "turret bank count")?;
    log::info!("{kind:?} banks : {n}");

    let mut banks = Vec::new();
    for bank in 0..n {
        let barrel_subobj = i32::read(buffer)?;
        let mount_subobj = i32::read(buffer)?;
        let normal = Vec3::read(buffer)?;
        let positions = read_list(buffer, "turret position count", Vec3::read)?;

        model
            .weapons
            .extend(positions.iter().map(|&pos| WeaponMount {
                pos,
                normal,
                subobj: 0,
                kind,
                bank,
            }));
        banks.push(TurretBank {
            barrel_subobj,
            mount_subobj,
            normal,
            positions,
        });
    }

    *model.turret_banks.get_mut(class) = banks;
    Ok(())
}

#[cfg(test)]
mod weapons_tests {
    use glam::vec3;

    use crate::test_util::{reader, ByteWriter};

    use super::*;

    fn gun_payload(banks: &[&[(Vec3, Vec3)]]) -> Vec<u8> {
        let mut w = ByteWriter::default();
        w.i32(banks.len() as i32);
        for bank in banks {
            w.i32(bank.len() as i32);
            for &(pos, normal) in bank.iter() {
                w.vec3(pos).vec3(normal);
            }
        }
        w.take()
    }

    #[test]
    fn gun_points_fill_both_representations() {
        let payload = gun_payload(&[
            &[(vec3(1.0, 0.0, 0.0), Vec3::Z), (vec3(-1.0, 0.0, 0.0), Vec3::Z)],
            &[(vec3(0.0, 1.0, 0.0), Vec3::Y)],
        ]);
        let mut model = PofModel::default();
        read_gun_points(&mut reader(payload), WeaponClass::Primary, &mut model).unwrap();

        let banks = model.gun_banks.get(WeaponClass::Primary);
        assert_eq!(banks.len(), 2);
        assert_eq!(banks[0].len(), 2);
        assert_eq!(banks[1][0].pos, vec3(0.0, 1.0, 0.0));
        assert!(model.gun_banks.get(WeaponClass::Secondary).is_empty());

        let total: usize = banks.iter().map(Vec::len).sum();
        assert_eq!(model.weapons.len(), total);
        assert_eq!(
            model.weapons[2],
            WeaponMount {
                pos: vec3(0.0, 1.0, 0.0),
                normal: Vec3::Y,
                subobj: 0,
                kind: WeaponKind::Gun,
                bank: 1,
            }
        );
    }

    #[test]
    fn repeated_chunk_replaces_banks_but_appends_mounts() {
        let payload = gun_payload(&[&[(Vec3::X, Vec3::Z)]]);
        let mut model = PofModel::default();
        read_gun_points(&mut reader(payload.clone()), WeaponClass::Secondary, &mut model)
            .unwrap();
        read_gun_points(&mut reader(payload), WeaponClass::Secondary, &mut model).unwrap();

        assert_eq!(model.gun_banks.get(WeaponClass::Secondary).len(), 1);
        assert_eq!(model.weapons.len(), 2);
        assert!(model.weapons.iter().all(|w| w.kind == WeaponKind::Missile));
    }

    #[test]
    fn turrets_share_one_normal() {
        let mut w = ByteWriter::default();
        w.i32(1)
            .i32(3)
            .i32(2)
            .vec3(Vec3::Y)
            .i32(2)
            .vec3(vec3(1.0, 1.0, 0.0))
            .vec3(vec3(-1.0, 1.0, 0.0));

        let mut model = PofModel::default();
        read_turrets(&mut reader(w.take()), WeaponClass::Secondary, &mut model).unwrap();

        let bank = &model.turret_banks.get(WeaponClass::Secondary)[0];
        assert_eq!(bank.barrel_subobj, 3);
        assert_eq!(bank.mount_subobj, 2);
        assert_eq!(bank.positions.len(), 2);

        assert_eq!(model.weapons.len(), 2);
        for (mount, &pos) in model.weapons.iter().zip(&bank.positions) {
            assert_eq!(mount.pos, pos);
            assert_eq!(mount.normal, Vec3::Y);
            assert_eq!(mount.kind, WeaponKind::MissileTurret);
            assert_eq!(mount.bank, 0);
            assert_eq!(mount.subobj, 0);
        }
    }

    #[test]
    fn negative_bank_count() {
        let mut w = ByteWriter::default();
        w.i32(-3);
        assert!(read_turrets(
            &mut reader(w.take()),
            WeaponClass::Primary,
            &mut PofModel::default()
        )
        .is_err());
    }
}
