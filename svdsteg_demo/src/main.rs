use anyhow::{Context, Result};
use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use svdsteg::prelude::*;
use svdsteg::*;

mod param;
mod npy;
mod imgio;

use param::{DemoParam, set_par_by_env};

static NOTIFY: NotifyOnce<LogNotify> = NotifyOnce::new(LogNotify);

/// main
fn main() -> Result<()> {
    env_logger::init();

    let par = DemoParam::default().par(|p| {
        set_par_by_env(p);
    });
    log::debug!("{:?}", par);

    let raw_data = &par.raw_data;
    std::fs::create_dir_all(raw_data)
        .with_context(|| format!("failed to create {}", raw_data.display()))?;

    //----- carrier: cached arrays, or a freshly decoded image

    let arr_file = raw_data.join("bw_arr.npy");
    let svd_dir = raw_data.join("bw_arr_svd");

    let (bw_arr, f_carrier) = if arr_file.exists() && svd_dir.exists() {
        log::info!("cache: {}", arr_file.display());
        let bw_arr = npy::load_npy(&arr_file)?;
        let f_carrier = npy::load_factorization(&svd_dir)?;
        (bw_arr, f_carrier)
    }
    else {
        let in_img_file = std::env::args().nth(1)
                          .with_context(|| format!("no cached arrays in {}, no input image filename", raw_data.display()))?;
        let bw_arr = imgio::img_to_bw_mat(in_img_file, par.resolution)?;
        let f_carrier = factorize(&bw_arr)?;
        npy::save_npy(&arr_file, &bw_arr)?;
        npy::save_factorization(&svd_dir, &f_carrier)?;
        (bw_arr, f_carrier)
    };
    imgio::save_bw_png(&bw_arr, raw_data.join("bw.png"), None, None)?;

    let (nrows, ncols) = bw_arr.size();
    let s_carrier = f_carrier.singular();
    log::info!("size: {}x{}, {} components", nrows, ncols, s_carrier.len());

    let n_comps = s_carrier.len();
    if par.hide_count < n_comps {
        let kept = n_comps - par.hide_count;
        let cum = cumulative_energy(&s_carrier)?;
        log::info!("top {} components carry {:.2}% of the energy", kept, cum[kept - 1] * 100.);

        let lowrank = reconstruct(&f_carrier, 0, Some(kept as isize - 1), &NOTIFY)?;
        imgio::save_bw_png(&lowrank, raw_data.join("bw_lowrank.png"), Some(0.), Some(255.))?;
    }

    //----- payload: noise with text at a distinguished value

    let mask = imgio::text_mask(nrows, ncols, &par.message, &par.font_family, par.font_size, (par.text_x, par.text_y))?;

    let mut rng = Xoshiro256StarStar::seed_from_u64(par.seed);
    let scale = par.payload_scale;
    let payload = Mat::new(nrows, ncols).set_by(|r, c| {
        if mask.is_set(r, c) {-scale} else {rng.gen::<f64>() * scale}
    });
    imgio::save_bw_png(&payload, raw_data.join("payload.png"), None, None)?;

    let f_payload = factorize(&payload)?;

    //----- hide

    let hidden = swap_low_for_high(&f_carrier, &f_payload, par.hide_count, &NOTIFY)?;
    let bw_arr_pm = hidden.compose();

    let rel_err = (&bw_arr_pm - &bw_arr).norm_p2() / bw_arr.norm_p2();
    log::info!("relative change of the carrier: {:.3e}", rel_err);

    npy::save_npy(raw_data.join("bw_arr_pm.npy"), &bw_arr_pm)?;
    imgio::save_bw_png(&bw_arr_pm, raw_data.join("bw_pm.png"), Some(0.), Some(255.))?;

    //----- reveal

    let f_pm = factorize(&bw_arr_pm)?;
    let revealed = reconstruct(&f_pm, -(par.hide_count as isize), None, &NOTIFY)?;
    imgio::save_bw_png(&revealed, raw_data.join("revealed.png"), None, None)?;

    Ok(())
}
