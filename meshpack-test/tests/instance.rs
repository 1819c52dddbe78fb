use anyhow::Result;
use glam::{Mat4, Quat, Vec3};
use meshpack::{pack_instances, InstanceLayout};
use meshpack_test::read_f32s;

#[test]
pub fn particle_field_transforms() -> Result<()> {
    let layout = InstanceLayout::after(&meshpack_test::position_half_normal_layout()?);
    let transforms: Vec<Mat4> = (0..10)
        .map(|i| {
            Mat4::from_scale_rotation_translation(
                Vec3::splat(0.1),
                Quat::from_rotation_z(i as f32),
                Vec3::new(i as f32, 0.0, -(i as f32)),
            )
        })
        .collect();

    let packed = pack_instances(&layout, &transforms);

    assert_eq!(packed.data().len(), transforms.len() * layout.stride() as usize);
    for (instance, transform) in packed.data().chunks_exact(64).zip(&transforms) {
        assert_eq!(read_f32s(instance)?, transform.to_cols_array().to_vec());
    }
    assert_eq!(layout.buffer_layout().attributes.len(), 4);
    Ok(())
}

#[test]
pub fn no_instances() {
    let packed = pack_instances(&InstanceLayout::new(0), &[]);
    assert!(packed.data().is_empty());
    assert_eq!(packed.instance_count(), 0);
}
