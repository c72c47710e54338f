use fisheye_core::{Layout, LayoutKind, Lens, LensKind, SphereRotation};
use fisheye_remap::{remap, PanoGeometry, PhotoGeometry, Projection};
use image::RgbImage;
use log::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fisheye",
    about = "Convert between fisheye photos and equirectangular panoramas"
)]
enum Opt {
    /// Render a fisheye photo out of an equirectangular panorama.
    MakePhoto {
        /// The layout of the output photo.
        #[structopt(long = "type", possible_values = &LayoutKind::NAMES)]
        otype: LayoutKind,
        /// The lens of the output photo.
        #[structopt(long, possible_values = &LensKind::NAMES)]
        lens: LensKind,
        /// The output field of view in degrees (per circle for double).
        #[structopt(long)]
        fov: f64,
        /// Scene rotation as three degrees <pitch yaw roll>; may be
        /// given more than once, composed in the order given.
        #[structopt(
            short,
            long,
            number_of_values = 3,
            allow_hyphen_values = true,
            value_names = &["pitch", "yaw", "roll"]
        )]
        rotation: Vec<f64>,
        /// Vertical size of the output photo in pixels (default: the
        /// source panorama height).
        #[structopt(short, long)]
        size: Option<u32>,
        /// The panorama image to read.
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// The photo image to write (format detected from extension).
        #[structopt(parse(from_os_str))]
        output: PathBuf,
    },
    /// Render an equirectangular panorama out of a fisheye photo.
    MakePano {
        /// The layout of the input photo.
        #[structopt(long = "type", possible_values = &LayoutKind::NAMES)]
        itype: LayoutKind,
        /// The lens of the input photo.
        #[structopt(long, possible_values = &LensKind::NAMES)]
        lens: LensKind,
        /// The input field of view in degrees (per circle for double).
        #[structopt(long)]
        fov: f64,
        /// Scene rotation as three degrees <pitch yaw roll>; may be
        /// given more than once, composed in the order given.
        #[structopt(
            short,
            long,
            number_of_values = 3,
            allow_hyphen_values = true,
            value_names = &["pitch", "yaw", "roll"]
        )]
        rotation: Vec<f64>,
        /// The photo image to read.
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// The panorama image to write (format detected from extension).
        #[structopt(parse(from_os_str))]
        output: PathBuf,
    },
    /// Re-render a photo under a different lens, FoV, layout, or
    /// orientation in one pass.
    AlterPhoto {
        /// The layout of the input photo.
        #[structopt(long, possible_values = &LayoutKind::NAMES)]
        itype: LayoutKind,
        /// The layout of the output photo.
        #[structopt(long, possible_values = &LayoutKind::NAMES)]
        otype: LayoutKind,
        /// The lens of the input photo.
        #[structopt(long, possible_values = &LensKind::NAMES)]
        ilens: LensKind,
        /// The lens of the output photo.
        #[structopt(long, possible_values = &LensKind::NAMES)]
        olens: LensKind,
        /// The input field of view in degrees.
        #[structopt(long)]
        ifov: f64,
        /// The output field of view in degrees.
        #[structopt(long)]
        ofov: f64,
        /// Scene rotation as three degrees <pitch yaw roll>; may be
        /// given more than once, composed in the order given.
        #[structopt(
            short,
            long,
            number_of_values = 3,
            allow_hyphen_values = true,
            value_names = &["pitch", "yaw", "roll"]
        )]
        rotation: Vec<f64>,
        /// The photo image to read.
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// The photo image to write (format detected from extension).
        #[structopt(parse(from_os_str))]
        output: PathBuf,
    },
}

fn main() {
    pretty_env_logger::init();
    if let Err(error) = run(Opt::from_args()) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    match opt {
        Opt::MakePhoto {
            otype,
            lens,
            fov,
            rotation,
            size,
            input,
            output,
        } => {
            let source = open_image(&input)?;
            let pano = PanoGeometry::new(source.width(), source.height())
                .map_err(|e| format!("{}: {}", input.display(), e))?;
            let height = size.unwrap_or_else(|| source.height());
            let photo = photo_geometry(
                otype,
                lens,
                fov,
                photo_dimensions(otype, height),
                "--type/--lens/--fov",
            )?;
            let rotation = compose_rotation(&rotation);
            let result = remap(
                &source,
                &Projection::Pano(pano),
                &Projection::Photo(photo),
                &rotation,
            );
            save_image(&result, &output)
        }
        Opt::MakePano {
            itype,
            lens,
            fov,
            rotation,
            input,
            output,
        } => {
            let source = open_image(&input)?;
            let photo =
                source_photo_geometry(itype, lens, fov, &source, &input, "--type/--lens/--fov")?;
            let pano = PanoGeometry::new(2 * source.height(), source.height())
                .map_err(|e| format!("{}: {}", input.display(), e))?;
            let rotation = compose_rotation(&rotation);
            let result = remap(
                &source,
                &Projection::Photo(photo),
                &Projection::Pano(pano),
                &rotation,
            );
            save_image(&result, &output)
        }
        Opt::AlterPhoto {
            itype,
            otype,
            ilens,
            olens,
            ifov,
            ofov,
            rotation,
            input,
            output,
        } => {
            let source = open_image(&input)?;
            let source_photo = source_photo_geometry(
                itype,
                ilens,
                ifov,
                &source,
                &input,
                "--itype/--ilens/--ifov",
            )?;
            let dest_dims = alter_dimensions(itype, otype, source.width(), source.height());
            let dest_photo =
                photo_geometry(otype, olens, ofov, dest_dims, "--otype/--olens/--ofov")?;
            let rotation = compose_rotation(&rotation);
            let result = remap(
                &source,
                &Projection::Photo(source_photo),
                &Projection::Photo(dest_photo),
                &rotation,
            );
            save_image(&result, &output)
        }
    }
}

/// Output photo dimensions for a vertical size: single-circle layouts
/// are square, double layouts hold two squares side by side.
fn photo_dimensions(kind: LayoutKind, height: u32) -> (u32, u32) {
    match kind {
        LayoutKind::Double => (2 * height, height),
        _ => (height, height),
    }
}

/// Output dimensions for `alter-photo`: converting a single-circle
/// layout to `double` doubles the width at fixed height, the reverse
/// halves it, and anything else keeps the source dimensions.
fn alter_dimensions(itype: LayoutKind, otype: LayoutKind, width: u32, height: u32) -> (u32, u32) {
    match (itype, otype) {
        (LayoutKind::Double, LayoutKind::Double) => (width, height),
        (_, LayoutKind::Double) => (2 * width, height),
        (LayoutKind::Double, _) => (width / 2, height),
        _ => (width, height),
    }
}

fn photo_geometry(
    kind: LayoutKind,
    lens: LensKind,
    fov: f64,
    (width, height): (u32, u32),
    flags: &str,
) -> Result<PhotoGeometry, Box<dyn Error>> {
    let lens = Lens::new(lens, fov).map_err(|e| format!("{}: {}", flags, e))?;
    let layout = Layout::new(kind, width, height).map_err(|e| format!("{}: {}", flags, e))?;
    PhotoGeometry::new(lens, layout).map_err(|e| format!("{}: {}", flags, e).into())
}

/// Builds the geometry describing an existing photo file, so failures
/// name the file alongside the flags.
fn source_photo_geometry(
    kind: LayoutKind,
    lens: LensKind,
    fov: f64,
    source: &RgbImage,
    input: &Path,
    flags: &str,
) -> Result<PhotoGeometry, Box<dyn Error>> {
    photo_geometry(kind, lens, fov, (source.width(), source.height()), flags)
        .map_err(|e| format!("{}: {}", input.display(), e).into())
}

fn compose_rotation(angles: &[f64]) -> SphereRotation {
    angles
        .chunks_exact(3)
        .fold(SphereRotation::identity(), |acc, chunk| {
            acc.then(&SphereRotation::from_degrees(chunk[0], chunk[1], chunk[2]))
        })
}

fn open_image(path: &Path) -> Result<RgbImage, Box<dyn Error>> {
    let image = image::open(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?
        .to_rgb8();
    info!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

fn save_image(image: &RgbImage, path: &Path) -> Result<(), Box<dyn Error>> {
    image
        .save(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    info!("wrote {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}
