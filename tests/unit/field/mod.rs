mod blur;
mod noise;
