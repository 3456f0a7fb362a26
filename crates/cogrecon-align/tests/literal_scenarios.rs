//! Reference scenarios for the similarity alignment solver.
//!
//! The 2-D case is the worked example of Umeyama's paper, the 3-D case an exact rigid
//! motion (90 degrees about z plus a unit translation).

use approx::assert_relative_eq;
use cogrecon_align::{metrics, solve, AlignError, PointSet, SimilarityTransform};

#[test]
fn test_umeyama_paper_example() -> Result<(), Box<dyn std::error::Error>> {
    let source = PointSet::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 2.0]])?;
    let target = PointSet::from_points(&[[0.0, 0.0], [-1.0, 0.0], [0.0, 2.0]])?;

    let transform = solve(&source, &target)?;

    let expected_scale = 0.721;
    let expected_rotation = [[0.832, 0.555], [-0.555, 0.832]];
    let expected_translation = [-0.8, 0.4];

    assert_relative_eq!(transform.scale, expected_scale, epsilon = 1e-3);
    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(
                transform.rotation.read(i, j),
                expected_rotation[i][j],
                epsilon = 1e-3
            );
            assert_relative_eq!(
                transform.scaled_rotation().read(i, j),
                expected_scale * expected_rotation[i][j],
                epsilon = 1e-3
            );
        }
        assert_relative_eq!(
            transform.translation[i],
            expected_translation[i],
            epsilon = 1e-3
        );
    }

    // a reflection fits the data exactly, the proper rotation must be returned instead
    assert_relative_eq!(
        transform.rotation.as_ref().determinant(),
        1.0,
        epsilon = 1e-9
    );

    Ok(())
}

#[test]
fn test_rigid_motion_3d() -> Result<(), Box<dyn std::error::Error>> {
    let source = PointSet::from_points(&[[0.0, 0.0, 1.0], [1.0, 0.0, 3.0], [2.0, 5.0, 8.0]])?;

    let expected = SimilarityTransform::new(
        faer::mat![[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        1.0,
        vec![1.0, 1.0, 1.0],
    );
    let target = expected.apply(&source);

    let transform = solve(&source, &target)?;

    assert_relative_eq!(transform.scale, 1.0, epsilon = 1e-9);
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(
                transform.rotation.read(i, j),
                expected.rotation.read(i, j),
                epsilon = 1e-9
            );
        }
        assert_relative_eq!(transform.translation[i], 1.0, epsilon = 1e-9);
    }
    assert_relative_eq!(
        metrics::rmse(&transform, &source, &target),
        0.0,
        epsilon = 1e-9
    );

    Ok(())
}

#[test]
fn test_planar_points_in_space_are_degenerate() -> Result<(), Box<dyn std::error::Error>> {
    // four dimensional points spanning a plane: rank 2 < 4 - 1
    let source = PointSet::from_points(&[
        [0.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0, 0.0],
    ])?;
    let target = source.clone();

    let err = solve(&source, &target).expect_err("planar points in 4-D must be rejected");
    assert!(matches!(err, AlignError::DegenerateInput { rank: 2, dim: 4, .. }));
    assert!(err.to_string().contains("colinearity detected"));

    Ok(())
}
