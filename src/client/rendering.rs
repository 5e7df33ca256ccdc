use ggez::{
    Context, GameResult,
    glam::Vec2,
    graphics::{self, Color, DrawMode, MeshBuilder},
};
use skyhop::geometry::Aabb;
use skyhop::map::ColorDef;
use skyhop::world::{Decoration, SceneItem, World};

const BACKDROP_BANDS: u32 = 40;
const PLAYER_TOP: Color = Color::new(0.0, 150.0 / 255.0, 1.0, 1.0);
const PLAYER_BOTTOM: Color = Color::new(0.0, 100.0 / 255.0, 200.0 / 255.0, 1.0);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, ctx: &mut Context, world: &World) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Color::from_rgb(10, 10, 30));
        let mut mb = MeshBuilder::new();

        for item in world.scene.items() {
            match item {
                SceneItem::Decoration(Decoration::Backdrop { rect, top, bottom }) => {
                    draw_gradient(&mut mb, rect, color(*top), color(*bottom))?;
                }
                SceneItem::Decoration(Decoration::Star { pos, size, color: c }) => {
                    let r = size / 2.0;
                    mb.circle(DrawMode::fill(), Vec2::new(pos.x + r, pos.y + r), r, 0.5, color(*c))?;
                }
                SceneItem::Platform(p) => {
                    mb.rectangle(DrawMode::fill(), to_rect(&p.rect), color(p.color))?;
                    mb.rectangle(DrawMode::stroke(1.0), to_rect(&p.rect), color(p.outline))?;
                }
                SceneItem::MovingPlatform(p) => {
                    mb.rectangle(DrawMode::fill(), to_rect(&p.rect()), color(p.color))?;
                }
                SceneItem::Hazard(h) => {
                    let r = &h.rect;
                    mb.polygon(
                        DrawMode::fill(),
                        &[
                            Vec2::new(r.left(), r.bottom()),
                            Vec2::new(r.left() + r.size.x / 2.0, r.top()),
                            Vec2::new(r.right(), r.bottom()),
                        ],
                        color(h.color),
                    )?;
                }
            }
        }

        draw_gradient(&mut mb, &world.player.bounds(), PLAYER_TOP, PLAYER_BOTTOM)?;

        let mesh = graphics::Mesh::from_data(&ctx.gfx, mb.build());
        canvas.draw(&mesh, graphics::DrawParam::default());

        let p = &world.player;
        let hud = graphics::Text::new(format!(
            "score {}  coins {}  deaths {}",
            p.score, p.coins, p.deaths
        ));
        canvas.draw(
            &hud,
            graphics::DrawParam::default().dest(Vec2::new(10.0, world.scene.height() - 24.0)),
        );

        canvas.finish(ctx)
    }
}

/// Vertical gradient approximated with flat bands.
fn draw_gradient(mb: &mut MeshBuilder, rect: &Aabb, top: Color, bottom: Color) -> GameResult {
    let band_h = rect.size.y / BACKDROP_BANDS as f32;
    for i in 0..BACKDROP_BANDS {
        let t = i as f32 / (BACKDROP_BANDS - 1) as f32;
        let c = Color::new(
            top.r + (bottom.r - top.r) * t,
            top.g + (bottom.g - top.g) * t,
            top.b + (bottom.b - top.b) * t,
            top.a + (bottom.a - top.a) * t,
        );
        mb.rectangle(
            DrawMode::fill(),
            graphics::Rect::new(rect.left(), rect.top() + band_h * i as f32, rect.size.x, band_h),
            c,
        )?;
    }
    Ok(())
}

fn to_rect(r: &Aabb) -> graphics::Rect {
    graphics::Rect::new(r.left(), r.top(), r.size.x, r.size.y)
}

fn color(c: ColorDef) -> Color {
    Color::from_rgba(c.r, c.g, c.b, c.a)
}
