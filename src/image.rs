/// Memory layout of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
}

impl Layout {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn layout(&self) -> Layout;

    fn width(&self) -> usize {
        self.layout().width
    }

    fn height(&self) -> usize {
        self.layout().height
    }

    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        let offset = self.layout().offset(row, col);
        self.data().get(offset)
    }
}

pub trait ImageMut: Image {
    fn data_mut(&mut self) -> &mut [Self::Pixel];

    fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Self::Pixel> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        let index = self.layout().offset(row, col);
        self.data_mut().get_mut(index)
    }

    /// Set every pixel of the image to the `value`
    fn fill(&mut self, value: Self::Pixel)
    where
        Self::Pixel: Copy,
    {
        let layout = self.layout();
        let data = self.data_mut();
        for row in 0..layout.height {
            for col in 0..layout.width {
                data[layout.offset(row, col)] = value;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageOwned<P> {
    layout: Layout,
    data: Vec<P>,
}

impl<P> ImageOwned<P> {
    pub fn new_with<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            layout: Layout {
                width,
                height,
                row_stride: width,
            },
            data,
        }
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn layout(&self) -> Layout {
        self.layout
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl<P> ImageMut for ImageOwned<P> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_owned() {
        let mut image = ImageOwned::new_with(2, 3, |row, col| row * 10 + col);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.get(1, 2), Some(&12));
        assert_eq!(image.get(2, 0), None);
        assert_eq!(image.get(0, 3), None);

        if let Some(pixel) = image.get_mut(0, 1) {
            *pixel = 100;
        }
        assert_eq!(image.get(0, 1), Some(&100));

        image.fill(7);
        assert_eq!(image.data(), &[7; 6]);
    }
}
