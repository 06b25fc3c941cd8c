use clap::Parser;

use lib::{render, Generation, Parameters};

#[derive(Debug, Parser)]
#[command(about = "approximate sqrt(R^2) by sampling pairs of uniform draws")]
struct Opt {
    /// the R^2 value whose square root is approximated, clamped to [0, 1]
    #[arg(long, default_value_t = 0.5)]
    target_value: f32,
    /// number of (x, y) pairs per generation, clamped to [100, 10000]
    #[arg(long, default_value_t = 1000)]
    num_points: usize,
    #[arg(long, default_value_t = 1200)]
    width: usize,
    #[arg(long, default_value_t = 600)]
    height: usize,
    /// render one generation, print the readout, and exit without a window
    #[arg(long)]
    headless: bool,
}

fn print_readout(params: &Parameters, gen: &Generation) {
    println!(
        "target {:.4}, {} points: approximated sqrt {:.4}, actual sqrt {:.4}, {} selected",
        params.target_value(),
        params.num_points(),
        gen.approximated_sqrt,
        gen.actual_sqrt,
        gen.selected_count(),
    );
}

#[cfg(feature = "window")]
fn run_window(opt: &Opt, mut params: Parameters, mut gen: Generation) {
    use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

    let mut window = Window::new(
        "sqrt by sampling - arrows adjust, space regenerates",
        opt.width,
        opt.height,
        WindowOptions {
            scale: Scale::X1,
            ..WindowOptions::default()
        },
    )
    .unwrap_or_else(|e| {
        panic!("{}", e);
    });
    window.limit_update_rate(Some(std::time::Duration::from_micros(6944)));

    let mut dirty = true;
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let old_params = params;
        for key in window.get_keys_pressed(KeyRepeat::Yes) {
            match key {
                Key::Up => params.adjust_target(0.01),
                Key::Down => params.adjust_target(-0.01),
                Key::NumPadPlus => params.adjust_target(0.1),
                Key::NumPadMinus => params.adjust_target(-0.1),
                Key::Right => params.adjust_points(100),
                Key::Left => params.adjust_points(-100),
                // fresh draws with the same parameters
                Key::Space | Key::R => dirty = true,
                _ => {}
            }
        }
        if params != old_params {
            dirty = true;
        }
        if dirty {
            gen = params.generate();
            print_readout(&params, &gen);
            dirty = false;
        }

        let film = render(&gen, params.target_value(), opt.width, opt.height);
        window
            .update_with_buffer(&film.buffer, opt.width, opt.height)
            .unwrap();
    }
}

fn main() {
    let opt = Opt::parse();
    let params = Parameters::new(opt.target_value, opt.num_points);
    let gen = params.generate();
    print_readout(&params, &gen);

    if opt.headless {
        let _ = render(&gen, params.target_value(), opt.width, opt.height);
        return;
    }

    #[cfg(feature = "window")]
    run_window(&opt, params, gen);

    #[cfg(not(feature = "window"))]
    eprintln!("built without the window feature; rerun with --headless");
}
