use crate::layers::{fold_field, identity_field, FoldOptions, FoldSummary};
use crate::ops::INVALID;
use ndarray::{s, Array3};


/// Field of `rows × cols` random points in `[-half, half]²` with random parity.
pub(crate) fn random_field(rows: usize, cols: usize, half: f32, seed: u64) -> Array3<f32> {
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut field = Array3::random_using((rows, cols, 3), Uniform::new(-half, half), &mut rng);
    field
        .slice_mut(s![.., .., 2])
        .mapv_inplace(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 });
    field
}

#[test]
fn test_summary_reports_every_sample() {
    let mut field = Array3::<f32>::zeros((1, 4, 3));
    // 이미 무효한 샘플
    field[[0, 0, 0]] = 5.0;
    field[[0, 0, 2]] = -1.0;
    // 푸앵카레 원판 밖
    field[[0, 1, 0]] = 1.5;
    // 기본 삼각형 안
    field[[0, 2, 0]] = 0.3;
    field[[0, 2, 1]] = 0.2;
    // 다른 섹터
    field[[0, 3, 0]] = -0.2;
    field[[0, 3, 1]] = -0.4;
    field[[0, 3, 2]] = 1.0;

    let folded = fold_field(&mut field, 5, 4, 2, FoldOptions::default()).unwrap();
    assert!(folded.is_in_place());
    assert_eq!(
        folded.summary(),
        FoldSummary {
            reduced: 2,
            invalidated: 1,
            skipped: 1
        }
    );

    let view = folded.view();
    assert_eq!(view[[0, 0, 0]], 5.0);
    assert_eq!(view[[0, 0, 2]], -1.0);
    assert_eq!(view[[0, 1, 2]], INVALID);
    assert!(view[[0, 3, 2]] == 0.0 || view[[0, 3, 2]] == 1.0);
}

#[test]
fn test_identity_grid_shape_is_preserved() {
    let mut field = identity_field(17, 23, 0.99);
    let options = FoldOptions::default().with_in_place(false);
    let folded = fold_field(&mut field, 7, 3, 2, options).unwrap();
    assert!(!folded.is_in_place());
    assert_eq!(folded.view().shape(), &[17, 23, 3]);
    assert_eq!(folded.summary().total(), 17 * 23);
}
